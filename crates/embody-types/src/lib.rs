//! Protocol vocabulary shared by the attribute and message layers.
//!
//! - [`enums`] — bounded `u8` enumerations; decoding an undeclared code fails
//! - [`complex`] — packed positional structs (sensor samples, AFE settings,
//!   file entries) with fixed wire lengths
//! - [`unit`] — physical unit tags and fixed-point scaling

pub mod complex;
pub mod enums;
pub mod error;
pub mod unit;

pub use complex::{
    AccRaw, AfeSettings, AfeSettingsAll, BloodPressure, Diagnostics, FileEntry, FixedString,
    GyroRaw, Imu, ImuRaw, PulseRaw, PulseRawAll, Reporting, FILE_NAME_LEN,
};
pub use enums::{AlarmKind, ChargeState, CommandId, FirmwareUpdateState, NackCode, ReportingMode};
pub use error::{Result, TypeError};
pub use unit::{Scaled, Scaling, Unit};
