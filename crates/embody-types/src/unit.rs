//! Physical unit tags and fixed-point scaling.
//!
//! The wire carries integers; the registry declares how a raw integer maps
//! to a physical quantity: `physical = offset + raw * factor`, in `unit`.
//! Scaling is applied at the registry boundary, never in the primitives.

use embody_wire::WireError;

/// Physical unit of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Dimensionless.
    None,
    Percent,
    BeatsPerMinute,
    BreathsPerMinute,
    Milliseconds,
    DegreesCelsius,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Percent => "%",
            Unit::BeatsPerMinute => "bpm",
            Unit::BreathsPerMinute => "brpm",
            Unit::Milliseconds => "ms",
            Unit::DegreesCelsius => "\u{00B0}C",
        }
    }
}

/// Linear mapping between a raw wire integer and its physical value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    pub factor: f64,
    pub offset: f64,
}

impl Scaling {
    /// Raw value equals physical value.
    pub const IDENTITY: Scaling = Scaling {
        factor: 1.0,
        offset: 0.0,
    };

    pub const fn new(factor: f64, offset: f64) -> Self {
        Self { factor, offset }
    }

    /// Physical value represented by `raw`.
    pub fn to_physical(self, raw: i64) -> f64 {
        self.offset + raw as f64 * self.factor
    }

    /// Invert the mapping, rounding half to even.
    ///
    /// Fails when the result cannot be represented as an `i64`; narrower
    /// field widths are checked by the registry encoder.
    pub fn to_raw(self, physical: f64) -> Result<i64, WireError> {
        let raw = ((physical - self.offset) / self.factor).round_ties_even();
        if !raw.is_finite() || raw < i64::MIN as f64 || raw > i64::MAX as f64 {
            return Err(WireError::OutOfRange {
                context: "scaled physical value",
            });
        }
        Ok(raw as i64)
    }
}

/// A fixed-point wire integer together with its unit interpretation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaled {
    /// The integer as transmitted.
    pub raw: i64,
    pub unit: Unit,
    pub scaling: Scaling,
}

impl Scaled {
    pub fn new(raw: i64, unit: Unit, scaling: Scaling) -> Self {
        Self { raw, unit, scaling }
    }

    /// Build from a physical quantity, rounding half to even.
    pub fn from_physical(physical: f64, unit: Unit, scaling: Scaling) -> Result<Self, WireError> {
        Ok(Self {
            raw: scaling.to_raw(physical)?,
            unit,
            scaling,
        })
    }

    /// The physical quantity this value represents.
    pub fn physical(self) -> f64 {
        self.scaling.to_physical(self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // the temperature sensor's scale, 1/128 degree per count
    const TEMP: Scaling = Scaling::new(0.0078125, 0.0);

    #[test]
    fn identity_maps_raw_to_itself() {
        assert_eq!(Scaling::IDENTITY.to_physical(85), 85.0);
        assert_eq!(Scaling::IDENTITY.to_raw(85.0).unwrap(), 85);
    }

    #[test]
    fn temperature_scaling_matches_the_sensor() {
        assert_eq!(TEMP.to_physical(3200), 25.0);
        assert_eq!(TEMP.to_physical(-5120), -40.0);
        assert_eq!(TEMP.to_raw(25.0).unwrap(), 3200);
        assert_eq!(TEMP.to_raw(-40.0).unwrap(), -5120);
    }

    #[test]
    fn rounding_is_half_to_even() {
        let unit = Scaling::IDENTITY;
        assert_eq!(unit.to_raw(0.5).unwrap(), 0);
        assert_eq!(unit.to_raw(1.5).unwrap(), 2);
        assert_eq!(unit.to_raw(2.5).unwrap(), 2);
        assert_eq!(unit.to_raw(-0.5).unwrap(), 0);
        assert_eq!(unit.to_raw(-1.5).unwrap(), -2);
    }

    #[test]
    fn unrepresentable_values_fail() {
        assert!(Scaling::IDENTITY.to_raw(f64::NAN).is_err());
        assert!(Scaling::IDENTITY.to_raw(f64::INFINITY).is_err());
        assert!(Scaling::IDENTITY.to_raw(1e30).is_err());
    }

    #[test]
    fn scaled_roundtrips_through_physical() {
        let value = Scaled::new(3200, Unit::DegreesCelsius, TEMP);
        let back = Scaled::from_physical(value.physical(), Unit::DegreesCelsius, TEMP).unwrap();
        assert_eq!(back, value);
    }
}
