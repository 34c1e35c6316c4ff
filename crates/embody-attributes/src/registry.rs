//! The static attribute registry.
//!
//! One [`AttributeDescriptor`] per attribute id, built at compile time and
//! never mutated. Ids, widths and layouts follow the device protocol
//! exactly; changing an entry is a wire-format change.

use bytes::{BufMut, Bytes, BytesMut};
use embody_types::{
    AccRaw, AfeSettings, AfeSettingsAll, BloodPressure, ChargeState, Diagnostics, FixedString,
    GyroRaw, Imu, ImuRaw, PulseRaw, PulseRawAll, Scaled, Scaling, Unit,
};
use embody_wire::{Cursor, WireError};

use crate::error::{AttributeError, Result};
use crate::value::AttributeValue;

/// Attribute id constants.
pub mod id {
    pub const SERIAL_NO: u8 = 0x01;
    pub const FIRMWARE_VERSION: u8 = 0x02;
    pub const BLUETOOTH_MAC: u8 = 0x03;
    pub const MODEL: u8 = 0x04;
    pub const VENDOR: u8 = 0x05;
    pub const AFE_SETTINGS: u8 = 0x06;
    pub const AFE_SETTINGS_ALL: u8 = 0x07;
    pub const CURRENT_TIME: u8 = 0x71;
    pub const MEASUREMENT_DEACTIVATED: u8 = 0x72;
    pub const TRACE_LEVEL: u8 = 0x73;
    pub const NO_OF_PPG_VALUES: u8 = 0x74;
    pub const BATTERY_LEVEL: u8 = 0xA1;
    pub const PULSE_RAW_ALL: u8 = 0xA2;
    pub const BLOOD_PRESSURE: u8 = 0xA3;
    pub const IMU: u8 = 0xA4;
    pub const HEARTRATE: u8 = 0xA5;
    pub const SLEEP_MODE: u8 = 0xA6;
    pub const BREATH_RATE: u8 = 0xA7;
    pub const HEART_RATE_VARIABILITY: u8 = 0xA8;
    pub const CHARGE_STATE: u8 = 0xA9;
    pub const BELT_ON_BODY: u8 = 0xAA;
    pub const FIRMWARE_UPDATE_PROGRESS: u8 = 0xAB;
    pub const IMU_RAW: u8 = 0xAC;
    pub const HEART_RATE_INTERVAL: u8 = 0xAD;
    pub const PULSE_RAW: u8 = 0xB1;
    pub const ACC_RAW: u8 = 0xB2;
    pub const GYRO_RAW: u8 = 0xB3;
    pub const TEMPERATURE: u8 = 0xB4;
    pub const DIAGNOSTICS: u8 = 0xB5;
}

/// Concrete shape of an attribute's value on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    U8,
    U16,
    U64,
    I64,
    Bool,
    /// Signed 16-bit fixed-point; scaling and unit come from the descriptor.
    ScaledI16,
    String,
    ChargeState,
    AfeSettings,
    AfeSettingsAll,
    BloodPressure,
    Imu,
    ImuRaw,
    AccRaw,
    GyroRaw,
    PulseRaw,
    PulseRawAll,
    Diagnostics,
}

/// Everything the codec knows about one attribute id.
#[derive(Debug, Clone, Copy)]
pub struct AttributeDescriptor {
    pub id: u8,
    pub name: &'static str,
    /// Wire width of the value, bytes. Every attribute is fixed-width.
    pub width: usize,
    pub unit: Unit,
    pub scaling: Scaling,
    pub kind: AttributeKind,
}

const fn plain(
    id: u8,
    name: &'static str,
    width: usize,
    unit: Unit,
    kind: AttributeKind,
) -> AttributeDescriptor {
    AttributeDescriptor {
        id,
        name,
        width,
        unit,
        scaling: Scaling::IDENTITY,
        kind,
    }
}

/// The registry, ordered by id.
pub static ATTRIBUTES: &[AttributeDescriptor] = &[
    plain(id::SERIAL_NO, "serial_no", 8, Unit::None, AttributeKind::I64),
    plain(id::FIRMWARE_VERSION, "firmware_version", 8, Unit::None, AttributeKind::I64),
    plain(id::BLUETOOTH_MAC, "bluetooth_mac", 8, Unit::None, AttributeKind::I64),
    plain(id::MODEL, "model", 16, Unit::None, AttributeKind::String),
    plain(id::VENDOR, "vendor", 16, Unit::None, AttributeKind::String),
    plain(id::AFE_SETTINGS, "afe_settings", 20, Unit::None, AttributeKind::AfeSettings),
    plain(id::AFE_SETTINGS_ALL, "afe_settings_all", 36, Unit::None, AttributeKind::AfeSettingsAll),
    plain(id::CURRENT_TIME, "current_time", 8, Unit::Milliseconds, AttributeKind::U64),
    plain(id::MEASUREMENT_DEACTIVATED, "measurement_deactivated", 1, Unit::None, AttributeKind::U8),
    plain(id::TRACE_LEVEL, "trace_level", 1, Unit::None, AttributeKind::U8),
    plain(id::NO_OF_PPG_VALUES, "no_of_ppg_values", 1, Unit::None, AttributeKind::U8),
    plain(id::BATTERY_LEVEL, "battery_level", 1, Unit::Percent, AttributeKind::U8),
    plain(id::PULSE_RAW_ALL, "pulse_raw_all", 16, Unit::None, AttributeKind::PulseRawAll),
    plain(id::BLOOD_PRESSURE, "blood_pressure", 12, Unit::None, AttributeKind::BloodPressure),
    plain(id::IMU, "imu", 1, Unit::None, AttributeKind::Imu),
    plain(id::HEARTRATE, "heartrate", 2, Unit::BeatsPerMinute, AttributeKind::U16),
    plain(id::SLEEP_MODE, "sleep_mode", 1, Unit::None, AttributeKind::U8),
    plain(id::BREATH_RATE, "breath_rate", 1, Unit::BreathsPerMinute, AttributeKind::U8),
    plain(id::HEART_RATE_VARIABILITY, "heart_rate_variability", 2, Unit::Milliseconds, AttributeKind::U16),
    plain(id::CHARGE_STATE, "charge_state", 1, Unit::None, AttributeKind::ChargeState),
    plain(id::BELT_ON_BODY, "belt_on_body", 1, Unit::None, AttributeKind::Bool),
    plain(id::FIRMWARE_UPDATE_PROGRESS, "firmware_update_progress", 1, Unit::Percent, AttributeKind::U8),
    plain(id::IMU_RAW, "imu_raw", 12, Unit::None, AttributeKind::ImuRaw),
    plain(id::HEART_RATE_INTERVAL, "heart_rate_interval", 2, Unit::Milliseconds, AttributeKind::U16),
    plain(id::PULSE_RAW, "pulse_raw", 8, Unit::None, AttributeKind::PulseRaw),
    plain(id::ACC_RAW, "acc_raw", 6, Unit::None, AttributeKind::AccRaw),
    plain(id::GYRO_RAW, "gyro_raw", 6, Unit::None, AttributeKind::GyroRaw),
    // 1/128 degC per count, straight from the temperature sensor
    AttributeDescriptor {
        id: id::TEMPERATURE,
        name: "temperature",
        width: 2,
        unit: Unit::DegreesCelsius,
        scaling: Scaling::new(0.0078125, 0.0),
        kind: AttributeKind::ScaledI16,
    },
    plain(id::DIAGNOSTICS, "diagnostics", 24, Unit::None, AttributeKind::Diagnostics),
];

/// Look up the descriptor for `id`.
pub fn descriptor(id: u8) -> Result<&'static AttributeDescriptor> {
    ATTRIBUTES
        .iter()
        .find(|d| d.id == id)
        .ok_or(AttributeError::UnknownAttribute(id))
}

impl AttributeDescriptor {
    /// Decode one value of this attribute from the cursor.
    pub fn decode_value(&self, cur: &mut Cursor<'_>) -> Result<AttributeValue> {
        let value = match self.kind {
            AttributeKind::U8 => AttributeValue::U8(cur.read_u8()?),
            AttributeKind::U16 => AttributeValue::U16(cur.read_u16()?),
            AttributeKind::U64 => AttributeValue::U64(cur.read_u64()?),
            AttributeKind::I64 => AttributeValue::I64(cur.read_i64()?),
            AttributeKind::Bool => AttributeValue::Bool(cur.read_u8()? != 0),
            AttributeKind::ScaledI16 => {
                let raw = cur.read_i16()?;
                AttributeValue::Scaled(Scaled::new(i64::from(raw), self.unit, self.scaling))
            }
            AttributeKind::String => AttributeValue::String(FixedString::decode(cur)?),
            AttributeKind::ChargeState => {
                AttributeValue::ChargeState(ChargeState::try_from(cur.read_u8()?)?)
            }
            AttributeKind::AfeSettings => AttributeValue::AfeSettings(AfeSettings::decode(cur)?),
            AttributeKind::AfeSettingsAll => {
                AttributeValue::AfeSettingsAll(AfeSettingsAll::decode(cur)?)
            }
            AttributeKind::BloodPressure => {
                AttributeValue::BloodPressure(BloodPressure::decode(cur)?)
            }
            AttributeKind::Imu => AttributeValue::Imu(Imu::decode(cur)?),
            AttributeKind::ImuRaw => AttributeValue::ImuRaw(ImuRaw::decode(cur)?),
            AttributeKind::AccRaw => AttributeValue::AccRaw(AccRaw::decode(cur)?),
            AttributeKind::GyroRaw => AttributeValue::GyroRaw(GyroRaw::decode(cur)?),
            AttributeKind::PulseRaw => AttributeValue::PulseRaw(PulseRaw::decode(cur)?),
            AttributeKind::PulseRawAll => AttributeValue::PulseRawAll(PulseRawAll::decode(cur)?),
            AttributeKind::Diagnostics => AttributeValue::Diagnostics(Diagnostics::decode(cur)?),
        };
        Ok(value)
    }

    /// Encode `value` into `buf`.
    ///
    /// Fails before writing anything: kind mismatches and out-of-range raws
    /// are rejected with the buffer untouched.
    pub fn encode_value(&self, value: &AttributeValue, buf: &mut BytesMut) -> Result<()> {
        match (self.kind, value) {
            (AttributeKind::U8, AttributeValue::U8(v)) => buf.put_u8(*v),
            (AttributeKind::U16, AttributeValue::U16(v)) => buf.put_u16(*v),
            (AttributeKind::U64, AttributeValue::U64(v)) => buf.put_u64(*v),
            (AttributeKind::I64, AttributeValue::I64(v)) => buf.put_i64(*v),
            (AttributeKind::Bool, AttributeValue::Bool(v)) => buf.put_u8(u8::from(*v)),
            (AttributeKind::ScaledI16, AttributeValue::Scaled(v)) => {
                if v.unit != self.unit {
                    return Err(self.mismatch());
                }
                let raw = i16::try_from(v.raw).map_err(|_| WireError::OutOfRange {
                    context: "scaled attribute value",
                })?;
                buf.put_i16(raw);
            }
            (AttributeKind::String, AttributeValue::String(v)) => v.encode(buf),
            (AttributeKind::ChargeState, AttributeValue::ChargeState(v)) => {
                buf.put_u8((*v).into())
            }
            (AttributeKind::AfeSettings, AttributeValue::AfeSettings(v)) => v.encode(buf),
            (AttributeKind::AfeSettingsAll, AttributeValue::AfeSettingsAll(v)) => v.encode(buf),
            (AttributeKind::BloodPressure, AttributeValue::BloodPressure(v)) => v.encode(buf),
            (AttributeKind::Imu, AttributeValue::Imu(v)) => v.encode(buf),
            (AttributeKind::ImuRaw, AttributeValue::ImuRaw(v)) => v.encode(buf),
            (AttributeKind::AccRaw, AttributeValue::AccRaw(v)) => v.encode(buf),
            (AttributeKind::GyroRaw, AttributeValue::GyroRaw(v)) => v.encode(buf),
            (AttributeKind::PulseRaw, AttributeValue::PulseRaw(v)) => v.encode(buf),
            (AttributeKind::PulseRawAll, AttributeValue::PulseRawAll(v)) => v.encode(buf),
            (AttributeKind::Diagnostics, AttributeValue::Diagnostics(v)) => v.encode(buf),
            _ => return Err(self.mismatch()),
        }
        Ok(())
    }

    /// Check that `value` has this descriptor's shape without encoding it.
    pub fn ensure_matches(&self, value: &AttributeValue) -> Result<()> {
        let mut scratch = BytesMut::with_capacity(self.width);
        self.encode_value(value, &mut scratch).map(|_| ())
    }

    fn mismatch(&self) -> AttributeError {
        AttributeError::ValueMismatch {
            id: self.id,
            name: self.name,
        }
    }
}

/// Decode an attribute blob received out of band.
///
/// Returns the value and the number of bytes consumed (the descriptor's
/// width); trailing bytes in `bytes` are left for the caller.
pub fn decode_attribute(id: u8, bytes: &[u8]) -> Result<(AttributeValue, usize)> {
    let desc = descriptor(id)?;
    let mut cur = Cursor::new(bytes);
    let value = desc.decode_value(&mut cur)?;
    Ok((value, cur.position()))
}

/// Encode one attribute value as a standalone blob.
pub fn encode_attribute(id: u8, value: &AttributeValue) -> Result<Bytes> {
    let desc = descriptor(id)?;
    let mut buf = BytesMut::with_capacity(desc.width);
    desc.encode_value(value, &mut buf)?;
    debug_assert_eq!(buf.len(), desc.width);
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use embody_types::TypeError;

    use super::*;

    #[test]
    fn lookup_known_and_unknown_ids() {
        let desc = descriptor(id::BATTERY_LEVEL).unwrap();
        assert_eq!(desc.name, "battery_level");
        assert_eq!(desc.width, 1);
        assert_eq!(desc.unit, Unit::Percent);

        assert_eq!(
            descriptor(0xFE).unwrap_err(),
            AttributeError::UnknownAttribute(0xFE)
        );
    }

    #[test]
    fn table_is_ordered_and_free_of_duplicates() {
        for pair in ATTRIBUTES.windows(2) {
            assert!(pair[0].id < pair[1].id, "table out of order at 0x{:02X}", pair[1].id);
        }
    }

    #[test]
    fn width_coherence_for_every_descriptor() {
        // an all-zero buffer is a valid encoding for every attribute kind
        for desc in ATTRIBUTES {
            let zeros = vec![0u8; desc.width + 3];
            let (value, consumed) =
                decode_attribute(desc.id, &zeros).unwrap_or_else(|e| {
                    panic!("attribute {} failed to decode zeros: {e}", desc.name)
                });
            assert_eq!(consumed, desc.width, "{} consumed width", desc.name);

            let encoded = encode_attribute(desc.id, &value).unwrap();
            assert_eq!(encoded.len(), desc.width, "{} encoded width", desc.name);
            assert_eq!(encoded.as_ref(), &zeros[..desc.width], "{} round-trip", desc.name);
        }
    }

    #[test]
    fn serial_no_golden() {
        let bytes = [0x00, 0x00, 0x00, 0x00, 0x00, 0xBC, 0x61, 0x4E];
        let (value, consumed) = decode_attribute(id::SERIAL_NO, &bytes).unwrap();
        assert_eq!(consumed, 8);
        assert_eq!(value, AttributeValue::I64(12345678));
        assert_eq!(encode_attribute(id::SERIAL_NO, &value).unwrap().as_ref(), &bytes);
    }

    #[test]
    fn current_time_golden() {
        // 2022-04-20 00:05:25.283 UTC in ms
        let bytes = [0x00, 0x00, 0x01, 0x80, 0x44, 0x49, 0xBE, 0xA3];
        let (value, _) = decode_attribute(id::CURRENT_TIME, &bytes).unwrap();
        assert_eq!(value, AttributeValue::U64(1650413125283));
        assert_eq!(encode_attribute(id::CURRENT_TIME, &value).unwrap().as_ref(), &bytes);
    }

    #[test]
    fn battery_level_golden() {
        let (value, consumed) = decode_attribute(id::BATTERY_LEVEL, &[0x03]).unwrap();
        assert_eq!((value.clone(), consumed), (AttributeValue::U8(3), 1));
        assert_eq!(encode_attribute(id::BATTERY_LEVEL, &value).unwrap().as_ref(), &[0x03]);
    }

    #[test]
    fn heartrate_golden() {
        let (value, _) = decode_attribute(id::HEARTRATE, &[0x00, 0x37]).unwrap();
        assert_eq!(value, AttributeValue::U16(55));
    }

    #[test]
    fn temperature_decodes_scaled() {
        let (value, _) = decode_attribute(id::TEMPERATURE, &[0x0C, 0x80]).unwrap();
        let AttributeValue::Scaled(scaled) = value.clone() else {
            panic!("temperature must decode as a scaled value");
        };
        assert_eq!(scaled.raw, 3200);
        assert_eq!(scaled.unit, Unit::DegreesCelsius);
        assert_eq!(scaled.physical(), 25.0);
        assert_eq!(encode_attribute(id::TEMPERATURE, &value).unwrap().as_ref(), &[0x0C, 0x80]);

        let (value, _) = decode_attribute(id::TEMPERATURE, &[0xEC, 0x00]).unwrap();
        let AttributeValue::Scaled(scaled) = value else {
            panic!("temperature must decode as a scaled value");
        };
        assert_eq!(scaled.physical(), -40.0);
    }

    #[test]
    fn temperature_raw_out_of_i16_fails() {
        let value = AttributeValue::Scaled(Scaled::new(
            40000,
            Unit::DegreesCelsius,
            Scaling::new(0.0078125, 0.0),
        ));
        assert!(matches!(
            encode_attribute(id::TEMPERATURE, &value),
            Err(AttributeError::Type(TypeError::Wire(WireError::OutOfRange { .. })))
        ));
    }

    #[test]
    fn charge_state_decodes_the_enum() {
        let (value, _) = decode_attribute(id::CHARGE_STATE, &[0x01]).unwrap();
        assert_eq!(value, AttributeValue::ChargeState(ChargeState::Charging));

        assert!(matches!(
            decode_attribute(id::CHARGE_STATE, &[0x07]),
            Err(AttributeError::Type(TypeError::UnknownEnumValue {
                name: "ChargeState",
                code: 0x07
            }))
        ));
    }

    #[test]
    fn belt_on_body_is_a_plain_bool() {
        let (value, _) = decode_attribute(id::BELT_ON_BODY, &[0x00]).unwrap();
        assert_eq!(value, AttributeValue::Bool(false));
        let (value, _) = decode_attribute(id::BELT_ON_BODY, &[0x01]).unwrap();
        assert_eq!(value, AttributeValue::Bool(true));
    }

    #[test]
    fn model_string_golden() {
        let mut bytes = [0u8; 16];
        bytes[..12].copy_from_slice(b"Aidee Embody");
        let (value, consumed) = decode_attribute(id::MODEL, &bytes).unwrap();
        assert_eq!(consumed, 16);
        assert_eq!(
            value,
            AttributeValue::String(FixedString::new("Aidee Embody").unwrap())
        );
        assert_eq!(encode_attribute(id::MODEL, &value).unwrap().as_ref(), &bytes);
    }

    #[test]
    fn imu_raw_struct_golden() {
        let bytes = [
            0x01, 0x0F, 0xC3, 0xEB, 0x13, 0x7F, 0x00, 0x2E, 0xFF, 0xF7, 0xFF, 0xDC,
        ];
        let (value, consumed) = decode_attribute(id::IMU_RAW, &bytes).unwrap();
        assert_eq!(consumed, 12);
        assert_eq!(
            value,
            AttributeValue::ImuRaw(ImuRaw {
                acc_x: 271,
                acc_y: -15381,
                acc_z: 4991,
                gyr_x: 46,
                gyr_y: -9,
                gyr_z: -36
            })
        );
        assert_eq!(encode_attribute(id::IMU_RAW, &value).unwrap().as_ref(), &bytes);
    }

    #[test]
    fn diagnostics_golden() {
        let bytes = [
            0x23, 0xD5, 0xFE, 0x89, 0x72, 0xA6, 0x7D, 0x00, 0x10, 0xC3, 0xF6, 0xA0, 0x15, 0xF8,
            0xEA, 0x00, 0x00, 0x06, 0x32, 0x6D, 0x00, 0x06, 0x32, 0x17,
        ];
        let (value, consumed) = decode_attribute(id::DIAGNOSTICS, &bytes).unwrap();
        assert_eq!(consumed, 24);
        assert_eq!(encode_attribute(id::DIAGNOSTICS, &value).unwrap().as_ref(), &bytes);
    }

    #[test]
    fn value_kind_mismatch_is_rejected_before_writing() {
        let err = encode_attribute(id::BATTERY_LEVEL, &AttributeValue::U32(85)).unwrap_err();
        assert_eq!(
            err,
            AttributeError::ValueMismatch {
                id: id::BATTERY_LEVEL,
                name: "battery_level"
            }
        );

        // unit mismatch on a scaled value is a shape error too
        let wrong_unit = AttributeValue::Scaled(Scaled::new(100, Unit::Percent, Scaling::IDENTITY));
        assert!(matches!(
            encode_attribute(id::TEMPERATURE, &wrong_unit),
            Err(AttributeError::ValueMismatch { .. })
        ));
    }

    #[test]
    fn truncated_value_fails() {
        assert!(matches!(
            decode_attribute(id::HEARTRATE, &[0x00]),
            Err(AttributeError::Type(TypeError::Wire(WireError::Truncated { needed: 1 })))
        ));
    }

    #[test]
    fn ensure_matches_agrees_with_encode() {
        let desc = descriptor(id::BATTERY_LEVEL).unwrap();
        assert!(desc.ensure_matches(&AttributeValue::U8(85)).is_ok());
        assert!(desc.ensure_matches(&AttributeValue::U16(85)).is_err());
    }
}
