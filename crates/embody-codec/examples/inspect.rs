//! Decode hex-encoded frames from the command line.
//!
//! ```text
//! cargo run --example inspect -- 01 00 05 ab 09 12 00 06 a1 7d 62
//! ```
//!
//! Whitespace inside and between arguments is ignored, so captured UART
//! dumps can be pasted straight in.

use embody_codec::proto::{decode_frame, DecodeOutcome};

fn main() {
    let hex: String = std::env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join("")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if hex.is_empty() {
        eprintln!("usage: inspect <hex frame bytes>");
        std::process::exit(2);
    }

    let mut buf = match parse_hex(&hex) {
        Ok(bytes) => bytes,
        Err(msg) => {
            eprintln!("bad input: {msg}");
            std::process::exit(2);
        }
    };

    while !buf.is_empty() {
        match decode_frame(&buf) {
            DecodeOutcome::Frame { message, consumed } => {
                println!("frame ({consumed} bytes): {message:?}");
                buf.drain(..consumed);
            }
            DecodeOutcome::Failed { error, consumed } => {
                println!("bad frame ({consumed} bytes dropped): {error}");
                buf.drain(..consumed);
            }
            DecodeOutcome::Need(n) => {
                println!("incomplete: {n} more byte(s) needed");
                break;
            }
        }
    }
}

fn parse_hex(hex: &str) -> Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err("odd number of hex digits".into());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("not hex at offset {i}: {}", &hex[i..i + 2]))
        })
        .collect()
}
