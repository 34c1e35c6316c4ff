//! Bounded enumerations with `u8 <-> variant` bijections.
//!
//! Every enum decodes with `TryFrom<u8>` and fails on codes outside the
//! declared set. `ALL` lists the declared variants for totality checks.

use crate::error::TypeError;

/// Response codes carried by a negative acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NackCode {
    UnknownMessageType = 0x01,
    UnknownMessageContent = 0x02,
    UnknownAttribute = 0x03,
    MessageTooShort = 0x04,
    MessageTooLong = 0x05,
    IllegalCrc = 0x06,
    MessageBufferFull = 0x07,
    FileSystemError = 0x08,
    DeleteFileError = 0x09,
    FileNotFound = 0x0A,
    RetransmitFailed = 0x0B,
    FileNotOpened = 0x0C,
}

impl NackCode {
    pub const ALL: [NackCode; 12] = [
        NackCode::UnknownMessageType,
        NackCode::UnknownMessageContent,
        NackCode::UnknownAttribute,
        NackCode::MessageTooShort,
        NackCode::MessageTooLong,
        NackCode::IllegalCrc,
        NackCode::MessageBufferFull,
        NackCode::FileSystemError,
        NackCode::DeleteFileError,
        NackCode::FileNotFound,
        NackCode::RetransmitFailed,
        NackCode::FileNotOpened,
    ];

    /// Human-readable description of the device's complaint.
    pub fn description(self) -> &'static str {
        match self {
            NackCode::UnknownMessageType => "unknown message type",
            NackCode::UnknownMessageContent => "unknown message content",
            NackCode::UnknownAttribute => "unknown attribute",
            NackCode::MessageTooShort => "message too short",
            NackCode::MessageTooLong => "message too long",
            NackCode::IllegalCrc => "message with illegal CRC",
            NackCode::MessageBufferFull => "message buffer full",
            NackCode::FileSystemError => "file system error",
            NackCode::DeleteFileError => "delete file error",
            NackCode::FileNotFound => "file not found",
            NackCode::RetransmitFailed => "retransmit failed",
            NackCode::FileNotOpened => "file not opened",
        }
    }
}

impl TryFrom<u8> for NackCode {
    type Error = TypeError;

    fn try_from(code: u8) -> Result<Self, TypeError> {
        match code {
            0x01 => Ok(NackCode::UnknownMessageType),
            0x02 => Ok(NackCode::UnknownMessageContent),
            0x03 => Ok(NackCode::UnknownAttribute),
            0x04 => Ok(NackCode::MessageTooShort),
            0x05 => Ok(NackCode::MessageTooLong),
            0x06 => Ok(NackCode::IllegalCrc),
            0x07 => Ok(NackCode::MessageBufferFull),
            0x08 => Ok(NackCode::FileSystemError),
            0x09 => Ok(NackCode::DeleteFileError),
            0x0A => Ok(NackCode::FileNotFound),
            0x0B => Ok(NackCode::RetransmitFailed),
            0x0C => Ok(NackCode::FileNotOpened),
            code => Err(TypeError::UnknownEnumValue {
                name: "NackCode",
                code,
            }),
        }
    }
}

impl From<NackCode> for u8 {
    fn from(code: NackCode) -> u8 {
        code as u8
    }
}

/// How an attribute is reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReportingMode {
    Disabled = 0x00,
    Periodic = 0x01,
    OnChange = 0x02,
    PeriodicAndOnChange = 0x03,
}

impl ReportingMode {
    pub const ALL: [ReportingMode; 4] = [
        ReportingMode::Disabled,
        ReportingMode::Periodic,
        ReportingMode::OnChange,
        ReportingMode::PeriodicAndOnChange,
    ];
}

impl TryFrom<u8> for ReportingMode {
    type Error = TypeError;

    fn try_from(code: u8) -> Result<Self, TypeError> {
        match code {
            0x00 => Ok(ReportingMode::Disabled),
            0x01 => Ok(ReportingMode::Periodic),
            0x02 => Ok(ReportingMode::OnChange),
            0x03 => Ok(ReportingMode::PeriodicAndOnChange),
            code => Err(TypeError::UnknownEnumValue {
                name: "ReportingMode",
                code,
            }),
        }
    }
}

impl From<ReportingMode> for u8 {
    fn from(mode: ReportingMode) -> u8 {
        mode as u8
    }
}

/// Battery charging state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChargeState {
    NotCharging = 0x00,
    Charging = 0x01,
    Full = 0x02,
    Fault = 0x03,
}

impl ChargeState {
    pub const ALL: [ChargeState; 4] = [
        ChargeState::NotCharging,
        ChargeState::Charging,
        ChargeState::Full,
        ChargeState::Fault,
    ];
}

impl TryFrom<u8> for ChargeState {
    type Error = TypeError;

    fn try_from(code: u8) -> Result<Self, TypeError> {
        match code {
            0x00 => Ok(ChargeState::NotCharging),
            0x01 => Ok(ChargeState::Charging),
            0x02 => Ok(ChargeState::Full),
            0x03 => Ok(ChargeState::Fault),
            code => Err(TypeError::UnknownEnumValue {
                name: "ChargeState",
                code,
            }),
        }
    }
}

impl From<ChargeState> for u8 {
    fn from(state: ChargeState) -> u8 {
        state as u8
    }
}

/// Firmware update progress machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FirmwareUpdateState {
    Idle = 0x00,
    Started = 0x01,
    InProgress = 0x02,
    Verifying = 0x03,
    Completed = 0x04,
    Failed = 0x05,
}

impl FirmwareUpdateState {
    pub const ALL: [FirmwareUpdateState; 6] = [
        FirmwareUpdateState::Idle,
        FirmwareUpdateState::Started,
        FirmwareUpdateState::InProgress,
        FirmwareUpdateState::Verifying,
        FirmwareUpdateState::Completed,
        FirmwareUpdateState::Failed,
    ];
}

impl TryFrom<u8> for FirmwareUpdateState {
    type Error = TypeError;

    fn try_from(code: u8) -> Result<Self, TypeError> {
        match code {
            0x00 => Ok(FirmwareUpdateState::Idle),
            0x01 => Ok(FirmwareUpdateState::Started),
            0x02 => Ok(FirmwareUpdateState::InProgress),
            0x03 => Ok(FirmwareUpdateState::Verifying),
            0x04 => Ok(FirmwareUpdateState::Completed),
            0x05 => Ok(FirmwareUpdateState::Failed),
            code => Err(TypeError::UnknownEnumValue {
                name: "FirmwareUpdateState",
                code,
            }),
        }
    }
}

impl From<FirmwareUpdateState> for u8 {
    fn from(state: FirmwareUpdateState) -> u8 {
        state as u8
    }
}

/// Alarm notifications raised by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AlarmKind {
    LowBattery = 0x01,
    StorageFull = 0x02,
    SensorFault = 0x03,
    HighTemperature = 0x04,
}

impl AlarmKind {
    pub const ALL: [AlarmKind; 4] = [
        AlarmKind::LowBattery,
        AlarmKind::StorageFull,
        AlarmKind::SensorFault,
        AlarmKind::HighTemperature,
    ];
}

impl TryFrom<u8> for AlarmKind {
    type Error = TypeError;

    fn try_from(code: u8) -> Result<Self, TypeError> {
        match code {
            0x01 => Ok(AlarmKind::LowBattery),
            0x02 => Ok(AlarmKind::StorageFull),
            0x03 => Ok(AlarmKind::SensorFault),
            0x04 => Ok(AlarmKind::HighTemperature),
            code => Err(TypeError::UnknownEnumValue {
                name: "AlarmKind",
                code,
            }),
        }
    }
}

impl From<AlarmKind> for u8 {
    fn from(kind: AlarmKind) -> u8 {
        kind as u8
    }
}

/// Commands executable on the device.
///
/// The 0xA1..0xA4 block addresses the analog front end register surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandId {
    ResetDevice = 0x01,
    RebootDevice = 0x02,
    AfeReadAllRegs = 0xA1,
    AfeWriteReg = 0xA2,
    AfeCalibration = 0xA3,
    AfeGainSetting = 0xA4,
}

impl CommandId {
    pub const ALL: [CommandId; 6] = [
        CommandId::ResetDevice,
        CommandId::RebootDevice,
        CommandId::AfeReadAllRegs,
        CommandId::AfeWriteReg,
        CommandId::AfeCalibration,
        CommandId::AfeGainSetting,
    ];
}

impl TryFrom<u8> for CommandId {
    type Error = TypeError;

    fn try_from(code: u8) -> Result<Self, TypeError> {
        match code {
            0x01 => Ok(CommandId::ResetDevice),
            0x02 => Ok(CommandId::RebootDevice),
            0xA1 => Ok(CommandId::AfeReadAllRegs),
            0xA2 => Ok(CommandId::AfeWriteReg),
            0xA3 => Ok(CommandId::AfeCalibration),
            0xA4 => Ok(CommandId::AfeGainSetting),
            code => Err(TypeError::UnknownEnumValue {
                name: "CommandId",
                code,
            }),
        }
    }
}

impl From<CommandId> for u8 {
    fn from(command: CommandId) -> u8 {
        command as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_total<T>(all: &[T], name: &str)
    where
        T: TryFrom<u8, Error = TypeError> + Into<u8> + Copy + PartialEq + std::fmt::Debug,
    {
        let declared: Vec<u8> = all.iter().map(|&v| v.into()).collect();
        for code in 0..=u8::MAX {
            match T::try_from(code) {
                Ok(variant) => {
                    assert!(declared.contains(&code), "{name}: undeclared code {code:#04X}");
                    assert_eq!(variant.into(), code, "{name}: code {code:#04X} round-trip");
                }
                Err(TypeError::UnknownEnumValue { code: c, .. }) => {
                    assert_eq!(c, code);
                    assert!(!declared.contains(&code), "{name}: declared code {code:#04X} rejected");
                }
                Err(other) => panic!("{name}: unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn every_enum_is_total_over_u8() {
        assert_total(&NackCode::ALL, "NackCode");
        assert_total(&ReportingMode::ALL, "ReportingMode");
        assert_total(&ChargeState::ALL, "ChargeState");
        assert_total(&FirmwareUpdateState::ALL, "FirmwareUpdateState");
        assert_total(&AlarmKind::ALL, "AlarmKind");
        assert_total(&CommandId::ALL, "CommandId");
    }

    #[test]
    fn nack_descriptions_cover_every_code() {
        for code in NackCode::ALL {
            assert!(!code.description().is_empty());
        }
        assert_eq!(NackCode::IllegalCrc.description(), "message with illegal CRC");
    }

    #[test]
    fn charge_state_keeps_the_legacy_boolean_codes() {
        // 0/1 were transmitted as a plain bool by older firmware
        assert_eq!(ChargeState::try_from(0).unwrap(), ChargeState::NotCharging);
        assert_eq!(ChargeState::try_from(1).unwrap(), ChargeState::Charging);
    }
}
