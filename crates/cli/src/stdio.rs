//! Byte-level `ByteIo` over the process's real stdin/stdout.

use seq2d_core::ByteIo;
use std::io::{self, Read, Write};

#[derive(Default)]
pub struct StdIo;

impl ByteIo for StdIo {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match io::stdin().read(&mut byte) {
            Ok(0) => None,
            Ok(_) => Some(byte[0]),
            Err(_) => None,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        let _ = io::stdout().write_all(bytes);
    }

    fn flush(&mut self) {
        let _ = io::stdout().flush();
    }
}
