//! Packed complex types.
//!
//! Each type occupies a fixed number of wire bytes (`WIRE_LEN`), laid out
//! positionally, all fields big-endian. Decoders read from a [`Cursor`];
//! encoders append to a pre-sized `BytesMut` and cannot fail.

use std::fmt;

use bytes::{BufMut, BytesMut};
use embody_wire::{Cursor, WireError};

use crate::enums::ReportingMode;
use crate::error::Result;

/// Wire width of a file name field.
pub const FILE_NAME_LEN: usize = 16;

/// Fixed-width, null-padded ASCII string field.
///
/// Up to [`FILE_NAME_LEN`] bytes of printable ASCII; the remainder of the
/// field is zero-filled on the wire. Decoding trims at the first NUL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedString(String);

impl FixedString {
    /// Validate and wrap a string; fails if longer than the field or not ASCII.
    pub fn new(value: impl Into<String>) -> std::result::Result<Self, WireError> {
        let value = value.into();
        if value.len() > FILE_NAME_LEN {
            return Err(WireError::OutOfRange {
                context: "fixed string",
            });
        }
        if !value.bytes().all(|b| b.is_ascii() && b != 0) {
            return Err(WireError::InvalidAscii {
                context: "fixed string",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        let raw = cur.read_bytes(FILE_NAME_LEN)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(FILE_NAME_LEN);
        let trimmed = &raw[..end];
        if !trimmed.is_ascii() {
            return Err(WireError::InvalidAscii {
                context: "fixed string",
            }
            .into());
        }
        let value = String::from_utf8(trimmed.to_vec()).map_err(|_| WireError::InvalidAscii {
            context: "fixed string",
        })?;
        Ok(Self(value))
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_slice(self.0.as_bytes());
        buf.put_bytes(0, FILE_NAME_LEN - self.0.len());
    }
}

impl fmt::Display for FixedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a file listing: name plus size in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: FixedString,
    pub size: u32,
}

impl FileEntry {
    pub const WIRE_LEN: usize = FILE_NAME_LEN + 4;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            name: FixedString::decode(cur)?,
            size: cur.read_u32()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        self.name.encode(buf);
        buf.put_u32(self.size);
    }
}

/// Reporting configuration for one attribute: trigger mode and interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reporting {
    pub on_change: ReportingMode,
    pub interval_ms: u16,
}

impl Reporting {
    pub const WIRE_LEN: usize = 3;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            on_change: ReportingMode::try_from(cur.read_u8()?)?,
            interval_ms: cur.read_u16()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.on_change.into());
        buf.put_u16(self.interval_ms);
    }
}

/// Non-invasive blood pressure aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloodPressure {
    pub sys: u16,
    pub dia: u16,
    pub map: u16,
    /// Pulse arrival time, ms.
    pub pat: u32,
    pub pulse: u16,
}

impl BloodPressure {
    pub const WIRE_LEN: usize = 12;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            sys: cur.read_u16()?,
            dia: cur.read_u16()?,
            map: cur.read_u16()?,
            pat: cur.read_u32()?,
            pulse: cur.read_u16()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16(self.sys);
        buf.put_u16(self.dia);
        buf.put_u16(self.map);
        buf.put_u32(self.pat);
        buf.put_u16(self.pulse);
    }
}

/// Single ECG/PPG sample pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseRaw {
    pub ecg: i32,
    pub ppg: i32,
}

impl PulseRaw {
    pub const WIRE_LEN: usize = 8;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            ecg: cur.read_i32()?,
            ppg: cur.read_i32()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_i32(self.ecg);
        buf.put_i32(self.ppg);
    }
}

/// ECG plus all three PPG wavelengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseRawAll {
    pub ecg: i32,
    pub ppg_green: i32,
    pub ppg_red: i32,
    pub ppg_ir: i32,
}

impl PulseRawAll {
    pub const WIRE_LEN: usize = 16;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            ecg: cur.read_i32()?,
            ppg_green: cur.read_i32()?,
            ppg_red: cur.read_i32()?,
            ppg_ir: cur.read_i32()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_i32(self.ecg);
        buf.put_i32(self.ppg_green);
        buf.put_i32(self.ppg_red);
        buf.put_i32(self.ppg_ir);
    }
}

/// Fused orientation/activity classification byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Imu {
    pub orientation_and_activity: u8,
}

impl Imu {
    pub const WIRE_LEN: usize = 1;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            orientation_and_activity: cur.read_u8()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.orientation_and_activity);
    }
}

/// Raw 6-axis IMU sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImuRaw {
    pub acc_x: i16,
    pub acc_y: i16,
    pub acc_z: i16,
    pub gyr_x: i16,
    pub gyr_y: i16,
    pub gyr_z: i16,
}

impl ImuRaw {
    pub const WIRE_LEN: usize = 12;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            acc_x: cur.read_i16()?,
            acc_y: cur.read_i16()?,
            acc_z: cur.read_i16()?,
            gyr_x: cur.read_i16()?,
            gyr_y: cur.read_i16()?,
            gyr_z: cur.read_i16()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_i16(self.acc_x);
        buf.put_i16(self.acc_y);
        buf.put_i16(self.acc_z);
        buf.put_i16(self.gyr_x);
        buf.put_i16(self.gyr_y);
        buf.put_i16(self.gyr_z);
    }
}

/// Raw 3-axis accelerometer sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccRaw {
    pub acc_x: i16,
    pub acc_y: i16,
    pub acc_z: i16,
}

impl AccRaw {
    pub const WIRE_LEN: usize = 6;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            acc_x: cur.read_i16()?,
            acc_y: cur.read_i16()?,
            acc_z: cur.read_i16()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_i16(self.acc_x);
        buf.put_i16(self.acc_y);
        buf.put_i16(self.acc_z);
    }
}

/// Raw 3-axis gyroscope sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GyroRaw {
    pub gyr_x: i16,
    pub gyr_y: i16,
    pub gyr_z: i16,
}

impl GyroRaw {
    pub const WIRE_LEN: usize = 6;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            gyr_x: cur.read_i16()?,
            gyr_y: cur.read_i16()?,
            gyr_z: cur.read_i16()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_i16(self.gyr_x);
        buf.put_i16(self.gyr_y);
        buf.put_i16(self.gyr_z);
    }
}

/// Analog front end configuration, short form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AfeSettings {
    pub rf_gain: u8,
    pub cf_value: u8,
    pub ecg_gain: u8,
    pub ioffdac_range: u8,
    pub led1: u32,
    pub led4: u32,
    pub off_dac: i32,
    pub relative_gain: f32,
}

impl AfeSettings {
    pub const WIRE_LEN: usize = 20;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            rf_gain: cur.read_u8()?,
            cf_value: cur.read_u8()?,
            ecg_gain: cur.read_u8()?,
            ioffdac_range: cur.read_u8()?,
            led1: cur.read_u32()?,
            led4: cur.read_u32()?,
            off_dac: cur.read_i32()?,
            relative_gain: cur.read_f32()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.rf_gain);
        buf.put_u8(self.cf_value);
        buf.put_u8(self.ecg_gain);
        buf.put_u8(self.ioffdac_range);
        buf.put_u32(self.led1);
        buf.put_u32(self.led4);
        buf.put_i32(self.off_dac);
        buf.put_f32(self.relative_gain);
    }
}

/// Analog front end configuration, full form: every LED and offset DAC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AfeSettingsAll {
    pub rf_gain: u8,
    pub cf_value: u8,
    pub ecg_gain: u8,
    pub ioffdac_range: u8,
    pub led1: u32,
    pub led2: u32,
    pub led3: u32,
    pub led4: u32,
    pub off_dac1: i32,
    pub off_dac2: i32,
    pub off_dac3: i32,
    pub relative_gain: f32,
}

impl AfeSettingsAll {
    pub const WIRE_LEN: usize = 36;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            rf_gain: cur.read_u8()?,
            cf_value: cur.read_u8()?,
            ecg_gain: cur.read_u8()?,
            ioffdac_range: cur.read_u8()?,
            led1: cur.read_u32()?,
            led2: cur.read_u32()?,
            led3: cur.read_u32()?,
            led4: cur.read_u32()?,
            off_dac1: cur.read_i32()?,
            off_dac2: cur.read_i32()?,
            off_dac3: cur.read_i32()?,
            relative_gain: cur.read_f32()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u8(self.rf_gain);
        buf.put_u8(self.cf_value);
        buf.put_u8(self.ecg_gain);
        buf.put_u8(self.ioffdac_range);
        buf.put_u32(self.led1);
        buf.put_u32(self.led2);
        buf.put_u32(self.led3);
        buf.put_u32(self.led4);
        buf.put_i32(self.off_dac1);
        buf.put_i32(self.off_dac2);
        buf.put_i32(self.off_dac3);
        buf.put_f32(self.relative_gain);
    }
}

/// Battery gauge diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    /// Reported state of charge, raw gauge units.
    pub rep_soc: u16,
    pub avg_current: i16,
    pub rep_cap: u16,
    pub full_cap: u16,
    /// Time to empty.
    pub tte: u32,
    /// Time to full.
    pub ttf: u32,
    pub voltage: u32,
    pub avg_voltage: u32,
}

impl Diagnostics {
    pub const WIRE_LEN: usize = 24;

    pub fn decode(cur: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            rep_soc: cur.read_u16()?,
            avg_current: cur.read_i16()?,
            rep_cap: cur.read_u16()?,
            full_cap: cur.read_u16()?,
            tte: cur.read_u32()?,
            ttf: cur.read_u32()?,
            voltage: cur.read_u32()?,
            avg_voltage: cur.read_u32()?,
        })
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16(self.rep_soc);
        buf.put_i16(self.avg_current);
        buf.put_u16(self.rep_cap);
        buf.put_u16(self.full_cap);
        buf.put_u32(self.tte);
        buf.put_u32(self.ttf);
        buf.put_u32(self.voltage);
        buf.put_u32(self.avg_voltage);
    }
}
