#![forbid(unsafe_code)]

use std::io::Write;

use crate::bundle::error::{io_stage, BundleResult};

/// Footer magic marking an embedded payload.
pub const FOOTER_MAGIC: [u8; 5] = *b"PYBND";

/// Total footer length: magic + u64 payload size (little-endian).
pub const FOOTER_LEN: u64 = 5 + 8;

/// Bundle layout:
/// - stub bytes (verbatim copy of the bootloader binary)
/// - payload bytes (compiled script artifact, opaque)
/// - footer:
///   - [FOOTER_MAGIC 5]
///   - [u64 payload_size]
///
/// `payload_size` is the exact byte length of the payload immediately
/// preceding the footer. A file without the trailing magic is a bare stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterScan {
    Valid { payload_size: u64 },
    NotPresent,
}

pub fn write_footer(w: &mut dyn Write, payload_size: u64) -> BundleResult<()> {
    w.write_all(&FOOTER_MAGIC).map_err(io_stage("write footer"))?;
    w.write_all(&payload_size.to_le_bytes())
        .map_err(io_stage("write footer"))?;
    Ok(())
}

/// Decode the last `FOOTER_LEN` bytes of a file. A magic mismatch is the
/// expected outcome for a bare stub, not an error.
pub fn decode_footer(buf: &[u8; FOOTER_LEN as usize]) -> FooterScan {
    if buf[..5] != FOOTER_MAGIC {
        return FooterScan::NotPresent;
    }
    let mut size = [0u8; 8];
    size.copy_from_slice(&buf[5..]);
    FooterScan::Valid {
        payload_size: u64::from_le_bytes(size),
    }
}
