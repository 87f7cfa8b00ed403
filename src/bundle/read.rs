#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{Seek, SeekFrom};

use crate::bundle::error::{io_stage, BundleError, BundleResult};
use crate::bundle::format::{decode_footer, FooterScan, FOOTER_LEN};
use crate::bundle::io::read_exact;

/// Where an embedded payload sits inside a bundle file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PayloadSpan {
    pub start: u64,
    pub len: u64,
}

pub(crate) fn read_footer(file: &mut File) -> BundleResult<FooterScan> {
    let size = file.metadata().map_err(io_stage("stat bundle"))?.len();
    if size < FOOTER_LEN {
        return Err(BundleError::TooShortForFooter);
    }

    file.seek(SeekFrom::End(-(FOOTER_LEN as i64)))
        .map_err(io_stage("seek to footer"))?;
    let buf = read_exact::<{ FOOTER_LEN as usize }>(file).map_err(io_stage("read footer"))?;

    Ok(decode_footer(&buf))
}

/// Validate the footer and compute the payload's byte range. The caller
/// gets `NoPayload` for a bare stub and a bounds error for anything that
/// would read outside the file.
pub(crate) fn locate_payload(file: &mut File) -> BundleResult<PayloadSpan> {
    let size = file.metadata().map_err(io_stage("stat bundle"))?.len();

    let payload_size = match read_footer(file)? {
        FooterScan::NotPresent => return Err(BundleError::NoPayload),
        FooterScan::Valid { payload_size } => payload_size,
    };

    if payload_size == 0 {
        return Err(BundleError::EmptyPayload);
    }
    if payload_size > size - FOOTER_LEN {
        return Err(BundleError::CorruptFooter);
    }

    Ok(PayloadSpan {
        start: size - FOOTER_LEN - payload_size,
        len: payload_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::format::write_footer;

    fn file_with(bytes: &[u8]) -> (tempfile::TempDir, File) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture");
        std::fs::write(&path, bytes).unwrap();
        let f = File::open(&path).unwrap();
        (dir, f)
    }

    #[test]
    fn short_file_rejected() {
        let (_dir, mut f) = file_with(b"tiny");
        assert!(matches!(
            read_footer(&mut f),
            Err(BundleError::TooShortForFooter)
        ));
    }

    #[test]
    fn bare_stub_has_no_payload() {
        let (_dir, mut f) = file_with(&[0x7f; 64]);
        assert_eq!(read_footer(&mut f).unwrap(), FooterScan::NotPresent);
        assert!(matches!(
            locate_payload(&mut f),
            Err(BundleError::NoPayload)
        ));
    }

    #[test]
    fn valid_bundle_span() {
        let mut bytes = vec![0xaa; 100]; // stub
        bytes.extend_from_slice(&[0xbb; 40]); // payload
        write_footer(&mut bytes, 40).unwrap();

        let (_dir, mut f) = file_with(&bytes);
        assert_eq!(
            locate_payload(&mut f).unwrap(),
            PayloadSpan { start: 100, len: 40 }
        );
    }

    #[test]
    fn zero_size_payload_rejected() {
        let mut bytes = vec![0xaa; 32];
        write_footer(&mut bytes, 0).unwrap();

        let (_dir, mut f) = file_with(&bytes);
        assert!(matches!(
            locate_payload(&mut f),
            Err(BundleError::EmptyPayload)
        ));
    }

    #[test]
    fn oversized_payload_rejected() {
        // footer claims more payload bytes than precede it
        let mut bytes = vec![0xaa; 32];
        write_footer(&mut bytes, 1_000).unwrap();

        let (_dir, mut f) = file_with(&bytes);
        assert!(matches!(
            locate_payload(&mut f),
            Err(BundleError::CorruptFooter)
        ));
    }

    #[test]
    fn footer_only_file_rejected() {
        // exactly 13 bytes of valid-looking footer, no payload possible
        let mut bytes = Vec::new();
        write_footer(&mut bytes, 5).unwrap();

        let (_dir, mut f) = file_with(&bytes);
        assert!(matches!(
            locate_payload(&mut f),
            Err(BundleError::CorruptFooter)
        ));
    }

    #[test]
    fn payload_filling_whole_prefix_is_valid() {
        let mut bytes = vec![0xcc; 13]; // payload only, no stub prefix
        write_footer(&mut bytes, 13).unwrap();

        let (_dir, mut f) = file_with(&bytes);
        assert_eq!(
            locate_payload(&mut f).unwrap(),
            PayloadSpan { start: 0, len: 13 }
        );
    }
}
