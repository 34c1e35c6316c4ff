//! Type-code dispatch: one decoder entry per known message type.
//!
//! Requests and notifications occupy the low half of the code space;
//! a response carries its request's code with the high bit set.

use bytes::Bytes;
use embody_attributes::descriptor;
use embody_types::{
    AlarmKind, CommandId, FileEntry, FirmwareUpdateState, FixedString, ImuRaw, NackCode, PulseRaw,
    Reporting,
};
use embody_wire::Cursor;

use crate::error::{CodecError, Result};
use crate::message::Message;

pub const MSG_HEARTBEAT: u8 = 0x01;
pub const MSG_SET_ATTRIBUTE: u8 = 0x11;
pub const MSG_GET_ATTRIBUTE: u8 = 0x12;
pub const MSG_RESET_ATTRIBUTE: u8 = 0x13;
pub const MSG_CONFIGURE_REPORTING: u8 = 0x14;
pub const MSG_RESET_REPORTING: u8 = 0x15;
pub const MSG_PERIODIC_ATTRIBUTE: u8 = 0x21;
pub const MSG_RAW_PULSE_CHANGED: u8 = 0x22;
pub const MSG_SENSOR_DATA: u8 = 0x23;
pub const MSG_ALARM_EVENT: u8 = 0x31;
pub const MSG_FIRMWARE_UPDATE: u8 = 0x32;
pub const MSG_LIST_FILES: u8 = 0x41;
pub const MSG_GET_FILE_UART: u8 = 0x42;
pub const MSG_DELETE_FILE: u8 = 0x43;
pub const MSG_DELETE_ALL_FILES: u8 = 0x44;
pub const MSG_REFORMAT_DISK: u8 = 0x45;
pub const MSG_EXECUTE_COMMAND: u8 = 0x51;

pub const MSG_HEARTBEAT_RESPONSE: u8 = 0x81;
pub const MSG_NACK_RESPONSE: u8 = 0x82;
pub const MSG_SET_ATTRIBUTE_RESPONSE: u8 = 0x91;
pub const MSG_GET_ATTRIBUTE_RESPONSE: u8 = 0x92;
pub const MSG_RESET_ATTRIBUTE_RESPONSE: u8 = 0x93;
pub const MSG_CONFIGURE_REPORTING_RESPONSE: u8 = 0x94;
pub const MSG_RESET_REPORTING_RESPONSE: u8 = 0x95;
pub const MSG_PERIODIC_ATTRIBUTE_RESPONSE: u8 = 0xA1;
pub const MSG_RAW_PULSE_CHANGED_RESPONSE: u8 = 0xA2;
pub const MSG_SENSOR_DATA_RESPONSE: u8 = 0xA3;
pub const MSG_ALARM_EVENT_RESPONSE: u8 = 0xB1;
pub const MSG_LIST_FILES_RESPONSE: u8 = 0xC1;
pub const MSG_GET_FILE_UART_RESPONSE: u8 = 0xC2;
pub const MSG_DELETE_FILE_RESPONSE: u8 = 0xC3;
pub const MSG_DELETE_ALL_FILES_RESPONSE: u8 = 0xC4;
pub const MSG_REFORMAT_DISK_RESPONSE: u8 = 0xC5;
pub const MSG_EXECUTE_COMMAND_RESPONSE: u8 = 0xD1;

/// Decode a message body by type code.
///
/// The body slice must be exactly the frame's body; anything the layout
/// does not consume is trailing garbage.
pub(crate) fn decode_body(type_code: u8, body: &[u8]) -> Result<Message> {
    let mut cur = Cursor::new(body);
    let message = match type_code {
        MSG_HEARTBEAT => Message::Heartbeat,
        MSG_HEARTBEAT_RESPONSE => Message::HeartbeatResponse,
        MSG_NACK_RESPONSE => Message::NackResponse {
            error_code: NackCode::try_from(cur.read_u8()?)?,
        },

        MSG_SET_ATTRIBUTE => {
            let attribute_id = cur.read_u8()?;
            let value = descriptor(attribute_id)?.decode_value(&mut cur)?;
            Message::SetAttribute {
                attribute_id,
                value,
            }
        }
        MSG_SET_ATTRIBUTE_RESPONSE => Message::SetAttributeResponse,

        MSG_GET_ATTRIBUTE => Message::GetAttribute {
            attribute_id: cur.read_u8()?,
        },
        MSG_GET_ATTRIBUTE_RESPONSE => {
            let attribute_id = cur.read_u8()?;
            let changed_at = cur.read_u48()?;
            let reporting = Reporting::decode(&mut cur)?;
            let value = descriptor(attribute_id)?.decode_value(&mut cur)?;
            Message::GetAttributeResponse {
                attribute_id,
                changed_at,
                reporting,
                value,
            }
        }

        MSG_RESET_ATTRIBUTE => Message::ResetAttribute {
            attribute_id: cur.read_u8()?,
        },
        MSG_RESET_ATTRIBUTE_RESPONSE => Message::ResetAttributeResponse,

        MSG_CONFIGURE_REPORTING => Message::ConfigureReporting {
            attribute_id: cur.read_u8()?,
            reporting: Reporting::decode(&mut cur)?,
        },
        MSG_CONFIGURE_REPORTING_RESPONSE => Message::ConfigureReportingResponse,
        MSG_RESET_REPORTING => Message::ResetReporting,
        MSG_RESET_REPORTING_RESPONSE => Message::ResetReportingResponse,

        MSG_PERIODIC_ATTRIBUTE => {
            let attribute_id = cur.read_u8()?;
            let value = descriptor(attribute_id)?.decode_value(&mut cur)?;
            Message::PeriodicAttribute {
                attribute_id,
                value,
            }
        }
        MSG_PERIODIC_ATTRIBUTE_RESPONSE => Message::PeriodicAttributeResponse,

        MSG_RAW_PULSE_CHANGED => Message::RawPulseChanged {
            changed_at: cur.read_u48()?,
            sample: PulseRaw::decode(&mut cur)?,
        },
        MSG_RAW_PULSE_CHANGED_RESPONSE => Message::RawPulseChangedResponse,

        MSG_SENSOR_DATA => {
            let changed_at = cur.read_u48()?;
            let count = cur.read_u8()?;
            let mut samples = Vec::with_capacity(usize::from(count));
            for _ in 0..count {
                samples.push(ImuRaw::decode(&mut cur)?);
            }
            Message::SensorData {
                changed_at,
                samples,
            }
        }
        MSG_SENSOR_DATA_RESPONSE => Message::SensorDataResponse,

        MSG_ALARM_EVENT => Message::AlarmEvent {
            changed_at: cur.read_u48()?,
            alarm: AlarmKind::try_from(cur.read_u8()?)?,
        },
        MSG_ALARM_EVENT_RESPONSE => Message::AlarmEventResponse,

        MSG_FIRMWARE_UPDATE => Message::FirmwareUpdate {
            state: FirmwareUpdateState::try_from(cur.read_u8()?)?,
            progress: cur.read_u8()?,
        },

        MSG_LIST_FILES => Message::ListFiles,
        MSG_LIST_FILES_RESPONSE => {
            let count = cur.read_u8()?;
            let mut entries = Vec::with_capacity(usize::from(count));
            for _ in 0..count {
                entries.push(FileEntry::decode(&mut cur)?);
            }
            Message::ListFilesResponse { entries }
        }

        MSG_GET_FILE_UART => Message::GetFileUart {
            name: FixedString::decode(&mut cur)?,
        },
        MSG_GET_FILE_UART_RESPONSE => Message::GetFileUartResponse,

        MSG_DELETE_FILE => Message::DeleteFile {
            name: FixedString::decode(&mut cur)?,
        },
        MSG_DELETE_FILE_RESPONSE => Message::DeleteFileResponse,
        MSG_DELETE_ALL_FILES => Message::DeleteAllFiles,
        MSG_DELETE_ALL_FILES_RESPONSE => Message::DeleteAllFilesResponse,
        MSG_REFORMAT_DISK => Message::ReformatDisk,
        MSG_REFORMAT_DISK_RESPONSE => Message::ReformatDiskResponse,

        MSG_EXECUTE_COMMAND => {
            let command = CommandId::try_from(cur.read_u8()?)?;
            let len = cur.read_u8()?;
            let payload = Bytes::copy_from_slice(cur.read_bytes(usize::from(len))?);
            Message::ExecuteCommand { command, payload }
        }
        MSG_EXECUTE_COMMAND_RESPONSE => {
            let command = CommandId::try_from(cur.read_u8()?)?;
            let len = cur.read_u8()?;
            let payload = Bytes::copy_from_slice(cur.read_bytes(usize::from(len))?);
            Message::ExecuteCommandResponse { command, payload }
        }

        unknown => return Err(CodecError::UnknownMessageType(unknown)),
    };
    cur.finish()?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use embody_attributes::{id, AttributeValue};
    use embody_wire::WireError;

    use super::*;

    #[test]
    fn empty_body_rejects_extra_bytes() {
        assert_eq!(decode_body(MSG_HEARTBEAT, &[]).unwrap(), Message::Heartbeat);
        assert!(matches!(
            decode_body(MSG_HEARTBEAT, &[0x00]),
            Err(CodecError::Wire(WireError::TrailingGarbage { remaining: 1 }))
        ));
    }

    #[test]
    fn unknown_type_code_is_reported() {
        assert!(matches!(
            decode_body(0xFE, &[]),
            Err(CodecError::UnknownMessageType(0xFE))
        ));
    }

    #[test]
    fn attribute_value_width_comes_from_the_registry() {
        let body = [id::HEARTRATE, 0x00, 0x37];
        let message = decode_body(MSG_SET_ATTRIBUTE, &body).unwrap();
        assert_eq!(
            message,
            Message::SetAttribute {
                attribute_id: id::HEARTRATE,
                value: AttributeValue::U16(55),
            }
        );

        // one byte short of the declared width
        assert!(matches!(
            decode_body(MSG_SET_ATTRIBUTE, &[id::HEARTRATE, 0x00]),
            Err(CodecError::Attribute(_))
        ));

        // one byte beyond it
        assert!(matches!(
            decode_body(MSG_SET_ATTRIBUTE, &[id::HEARTRATE, 0x00, 0x37, 0x00]),
            Err(CodecError::Wire(WireError::TrailingGarbage { remaining: 1 }))
        ));
    }

    #[test]
    fn sensor_data_reads_exactly_count_samples() {
        let mut body = vec![0, 0, 0, 0, 0, 123, 2];
        body.extend_from_slice(&[0u8; 24]);
        let message = decode_body(MSG_SENSOR_DATA, &body).unwrap();
        assert_eq!(
            message,
            Message::SensorData {
                changed_at: 123,
                samples: vec![ImuRaw::default(); 2],
            }
        );

        // count says three, body carries two
        let mut short = vec![0, 0, 0, 0, 0, 123, 3];
        short.extend_from_slice(&[0u8; 24]);
        assert!(matches!(
            decode_body(MSG_SENSOR_DATA, &short),
            Err(CodecError::Type(_))
        ));
    }

    #[test]
    fn execute_command_payload_is_length_prefixed() {
        let body = [u8::from(CommandId::AfeWriteReg), 0x02, 0x10, 0x20];
        let message = decode_body(MSG_EXECUTE_COMMAND, &body).unwrap();
        assert_eq!(
            message,
            Message::ExecuteCommand {
                command: CommandId::AfeWriteReg,
                payload: Bytes::from_static(&[0x10, 0x20]),
            }
        );
    }
}
