//! Typed protocol messages and their body codecs.
//!
//! Every variant owns its payload. Body layouts are positional and
//! big-endian; attribute-bearing variants consult the attribute registry
//! for the value width, the wire itself carries no length byte.

use bytes::{BufMut, Bytes, BytesMut};
use embody_attributes::{descriptor, AttributeValue};
use embody_types::{
    AlarmKind, CommandId, FileEntry, FirmwareUpdateState, FixedString, ImuRaw, NackCode, PulseRaw,
    Reporting, FILE_NAME_LEN,
};
use embody_wire::{WireError, WireWrite, U48_MAX};

use crate::dispatch;
use crate::error::Result;

/// Largest element count a count-prefixed list can carry.
const MAX_LIST_COUNT: usize = u8::MAX as usize;

/// A protocol message, host or device originated.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // -- control --
    Heartbeat,
    HeartbeatResponse,
    NackResponse {
        error_code: NackCode,
    },

    // -- attributes --
    SetAttribute {
        attribute_id: u8,
        value: AttributeValue,
    },
    SetAttributeResponse,
    GetAttribute {
        attribute_id: u8,
    },
    GetAttributeResponse {
        attribute_id: u8,
        /// Last change, ms since the Unix epoch (48-bit on the wire).
        changed_at: u64,
        reporting: Reporting,
        value: AttributeValue,
    },
    ResetAttribute {
        attribute_id: u8,
    },
    ResetAttributeResponse,
    ConfigureReporting {
        attribute_id: u8,
        reporting: Reporting,
    },
    ConfigureReportingResponse,
    /// Clear reporting configuration for every attribute.
    ResetReporting,
    ResetReportingResponse,

    // -- notifications --
    PeriodicAttribute {
        attribute_id: u8,
        value: AttributeValue,
    },
    PeriodicAttributeResponse,
    RawPulseChanged {
        changed_at: u64,
        sample: PulseRaw,
    },
    RawPulseChangedResponse,
    SensorData {
        changed_at: u64,
        samples: Vec<ImuRaw>,
    },
    SensorDataResponse,
    AlarmEvent {
        changed_at: u64,
        alarm: AlarmKind,
    },
    AlarmEventResponse,
    FirmwareUpdate {
        state: FirmwareUpdateState,
        /// Percent complete.
        progress: u8,
    },

    // -- file system --
    ListFiles,
    ListFilesResponse {
        entries: Vec<FileEntry>,
    },
    GetFileUart {
        name: FixedString,
    },
    GetFileUartResponse,
    DeleteFile {
        name: FixedString,
    },
    DeleteFileResponse,
    DeleteAllFiles,
    DeleteAllFilesResponse,
    ReformatDisk,
    ReformatDiskResponse,

    // -- commands --
    ExecuteCommand {
        command: CommandId,
        payload: Bytes,
    },
    ExecuteCommandResponse {
        command: CommandId,
        payload: Bytes,
    },
}

impl Message {
    /// The wire type code of this variant.
    pub fn type_code(&self) -> u8 {
        match self {
            Message::Heartbeat => dispatch::MSG_HEARTBEAT,
            Message::HeartbeatResponse => dispatch::MSG_HEARTBEAT_RESPONSE,
            Message::NackResponse { .. } => dispatch::MSG_NACK_RESPONSE,
            Message::SetAttribute { .. } => dispatch::MSG_SET_ATTRIBUTE,
            Message::SetAttributeResponse => dispatch::MSG_SET_ATTRIBUTE_RESPONSE,
            Message::GetAttribute { .. } => dispatch::MSG_GET_ATTRIBUTE,
            Message::GetAttributeResponse { .. } => dispatch::MSG_GET_ATTRIBUTE_RESPONSE,
            Message::ResetAttribute { .. } => dispatch::MSG_RESET_ATTRIBUTE,
            Message::ResetAttributeResponse => dispatch::MSG_RESET_ATTRIBUTE_RESPONSE,
            Message::ConfigureReporting { .. } => dispatch::MSG_CONFIGURE_REPORTING,
            Message::ConfigureReportingResponse => dispatch::MSG_CONFIGURE_REPORTING_RESPONSE,
            Message::ResetReporting => dispatch::MSG_RESET_REPORTING,
            Message::ResetReportingResponse => dispatch::MSG_RESET_REPORTING_RESPONSE,
            Message::PeriodicAttribute { .. } => dispatch::MSG_PERIODIC_ATTRIBUTE,
            Message::PeriodicAttributeResponse => dispatch::MSG_PERIODIC_ATTRIBUTE_RESPONSE,
            Message::RawPulseChanged { .. } => dispatch::MSG_RAW_PULSE_CHANGED,
            Message::RawPulseChangedResponse => dispatch::MSG_RAW_PULSE_CHANGED_RESPONSE,
            Message::SensorData { .. } => dispatch::MSG_SENSOR_DATA,
            Message::SensorDataResponse => dispatch::MSG_SENSOR_DATA_RESPONSE,
            Message::AlarmEvent { .. } => dispatch::MSG_ALARM_EVENT,
            Message::AlarmEventResponse => dispatch::MSG_ALARM_EVENT_RESPONSE,
            Message::FirmwareUpdate { .. } => dispatch::MSG_FIRMWARE_UPDATE,
            Message::ListFiles => dispatch::MSG_LIST_FILES,
            Message::ListFilesResponse { .. } => dispatch::MSG_LIST_FILES_RESPONSE,
            Message::GetFileUart { .. } => dispatch::MSG_GET_FILE_UART,
            Message::GetFileUartResponse => dispatch::MSG_GET_FILE_UART_RESPONSE,
            Message::DeleteFile { .. } => dispatch::MSG_DELETE_FILE,
            Message::DeleteFileResponse => dispatch::MSG_DELETE_FILE_RESPONSE,
            Message::DeleteAllFiles => dispatch::MSG_DELETE_ALL_FILES,
            Message::DeleteAllFilesResponse => dispatch::MSG_DELETE_ALL_FILES_RESPONSE,
            Message::ReformatDisk => dispatch::MSG_REFORMAT_DISK,
            Message::ReformatDiskResponse => dispatch::MSG_REFORMAT_DISK_RESPONSE,
            Message::ExecuteCommand { .. } => dispatch::MSG_EXECUTE_COMMAND,
            Message::ExecuteCommandResponse { .. } => dispatch::MSG_EXECUTE_COMMAND_RESPONSE,
        }
    }

    /// Exact body length in bytes, validating every range invariant.
    ///
    /// This is the encoder's first half: once it succeeds, [`encode_body`]
    /// writes exactly this many bytes and cannot fail.
    ///
    /// [`encode_body`]: Message::encode_body
    pub(crate) fn body_len(&self) -> Result<usize> {
        let len = match self {
            Message::Heartbeat
            | Message::HeartbeatResponse
            | Message::SetAttributeResponse
            | Message::ResetAttributeResponse
            | Message::ConfigureReportingResponse
            | Message::ResetReporting
            | Message::ResetReportingResponse
            | Message::PeriodicAttributeResponse
            | Message::RawPulseChangedResponse
            | Message::SensorDataResponse
            | Message::AlarmEventResponse
            | Message::ListFiles
            | Message::GetFileUartResponse
            | Message::DeleteFileResponse
            | Message::DeleteAllFiles
            | Message::DeleteAllFilesResponse
            | Message::ReformatDisk
            | Message::ReformatDiskResponse => 0,

            Message::NackResponse { .. } => 1,
            Message::GetAttribute { .. } | Message::ResetAttribute { .. } => 1,
            Message::FirmwareUpdate { .. } => 2,
            Message::ConfigureReporting { .. } => 1 + Reporting::WIRE_LEN,

            Message::SetAttribute {
                attribute_id,
                value: _,
            }
            | Message::PeriodicAttribute {
                attribute_id,
                value: _,
            } => 1 + descriptor(*attribute_id)?.width,

            Message::GetAttributeResponse {
                attribute_id,
                changed_at,
                ..
            } => {
                check_timestamp(*changed_at)?;
                1 + 6 + Reporting::WIRE_LEN + descriptor(*attribute_id)?.width
            }

            Message::RawPulseChanged { changed_at, .. } => {
                check_timestamp(*changed_at)?;
                6 + PulseRaw::WIRE_LEN
            }
            Message::SensorData {
                changed_at,
                samples,
            } => {
                check_timestamp(*changed_at)?;
                check_count(samples.len(), "sensor sample count")?;
                6 + 1 + samples.len() * ImuRaw::WIRE_LEN
            }
            Message::AlarmEvent { changed_at, .. } => {
                check_timestamp(*changed_at)?;
                6 + 1
            }

            Message::ListFilesResponse { entries } => {
                check_count(entries.len(), "file entry count")?;
                1 + entries.len() * FileEntry::WIRE_LEN
            }
            Message::GetFileUart { .. } | Message::DeleteFile { .. } => FILE_NAME_LEN,

            Message::ExecuteCommand { payload, .. }
            | Message::ExecuteCommandResponse { payload, .. } => {
                check_count(payload.len(), "command payload length")?;
                1 + 1 + payload.len()
            }
        };
        Ok(len)
    }

    /// Append the message body to `buf`.
    ///
    /// Call [`body_len`] first; after it succeeds the only remaining
    /// failure is an attribute value whose shape fights its descriptor.
    ///
    /// [`body_len`]: Message::body_len
    pub(crate) fn encode_body(&self, buf: &mut BytesMut) -> Result<()> {
        match self {
            Message::Heartbeat
            | Message::HeartbeatResponse
            | Message::SetAttributeResponse
            | Message::ResetAttributeResponse
            | Message::ConfigureReportingResponse
            | Message::ResetReporting
            | Message::ResetReportingResponse
            | Message::PeriodicAttributeResponse
            | Message::RawPulseChangedResponse
            | Message::SensorDataResponse
            | Message::AlarmEventResponse
            | Message::ListFiles
            | Message::GetFileUartResponse
            | Message::DeleteFileResponse
            | Message::DeleteAllFiles
            | Message::DeleteAllFilesResponse
            | Message::ReformatDisk
            | Message::ReformatDiskResponse => {}

            Message::NackResponse { error_code } => buf.put_u8((*error_code).into()),

            Message::SetAttribute {
                attribute_id,
                value,
            }
            | Message::PeriodicAttribute {
                attribute_id,
                value,
            } => {
                buf.put_u8(*attribute_id);
                descriptor(*attribute_id)?.encode_value(value, buf)?;
            }

            Message::GetAttribute { attribute_id } | Message::ResetAttribute { attribute_id } => {
                buf.put_u8(*attribute_id)
            }

            Message::GetAttributeResponse {
                attribute_id,
                changed_at,
                reporting,
                value,
            } => {
                buf.put_u8(*attribute_id);
                buf.put_u48(*changed_at);
                reporting.encode(buf);
                descriptor(*attribute_id)?.encode_value(value, buf)?;
            }

            Message::ConfigureReporting {
                attribute_id,
                reporting,
            } => {
                buf.put_u8(*attribute_id);
                reporting.encode(buf);
            }

            Message::RawPulseChanged { changed_at, sample } => {
                buf.put_u48(*changed_at);
                sample.encode(buf);
            }

            Message::SensorData {
                changed_at,
                samples,
            } => {
                buf.put_u48(*changed_at);
                buf.put_u8(samples.len() as u8);
                for sample in samples {
                    sample.encode(buf);
                }
            }

            Message::AlarmEvent { changed_at, alarm } => {
                buf.put_u48(*changed_at);
                buf.put_u8((*alarm).into());
            }

            Message::FirmwareUpdate { state, progress } => {
                buf.put_u8((*state).into());
                buf.put_u8(*progress);
            }

            Message::ListFilesResponse { entries } => {
                buf.put_u8(entries.len() as u8);
                for entry in entries {
                    entry.encode(buf);
                }
            }

            Message::GetFileUart { name } | Message::DeleteFile { name } => name.encode(buf),

            Message::ExecuteCommand { command, payload }
            | Message::ExecuteCommandResponse { command, payload } => {
                buf.put_u8((*command).into());
                buf.put_u8(payload.len() as u8);
                buf.put_slice(payload);
            }
        }
        Ok(())
    }
}

fn check_timestamp(changed_at: u64) -> Result<()> {
    if changed_at > U48_MAX {
        return Err(WireError::OutOfRange {
            context: "48-bit timestamp",
        }
        .into());
    }
    Ok(())
}

fn check_count(count: usize, context: &'static str) -> Result<()> {
    if count > MAX_LIST_COUNT {
        return Err(WireError::OutOfRange { context }.into());
    }
    Ok(())
}
