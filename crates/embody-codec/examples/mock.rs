//! Encode a handful of representative messages and print the wire bytes,
//! then feed them back through the decoder. Handy as a quick smoke test
//! against a device trace.

use embody_codec::attributes::{id, AttributeValue};
use embody_codec::proto::{decode_frame, encode_message, DecodeOutcome, Message};
use embody_codec::types::{FileEntry, FixedString, Reporting, ReportingMode};

fn main() {
    let messages = vec![
        Message::Heartbeat,
        Message::GetAttribute {
            attribute_id: id::BATTERY_LEVEL,
        },
        Message::GetAttributeResponse {
            attribute_id: id::BATTERY_LEVEL,
            changed_at: 123,
            reporting: Reporting {
                on_change: ReportingMode::Periodic,
                interval_ms: 60,
            },
            value: AttributeValue::U8(85),
        },
        Message::ListFilesResponse {
            entries: vec![FileEntry {
                name: FixedString::new("LOG0001.BIN").expect("static name fits"),
                size: 65536,
            }],
        },
    ];

    for message in messages {
        let frame = encode_message(&message).expect("sample messages encode");
        println!("{message:?}");
        println!("  -> {}", to_hex(&frame));
        match decode_frame(&frame) {
            DecodeOutcome::Frame { consumed, .. } => {
                println!("  <- decoded back, {consumed} bytes");
            }
            other => println!("  <- unexpected outcome {other:?}"),
        }
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
