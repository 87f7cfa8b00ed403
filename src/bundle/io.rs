#![forbid(unsafe_code)]

use std::io::{Read, Write};

pub fn read_exact<const N: usize>(r: &mut dyn Read) -> std::io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Chunked copy of at most `limit` bytes. Partial reads are retried; the
/// return value is the number of bytes actually copied, which is short of
/// `limit` only when the reader hit end-of-file first.
pub fn copy_up_to(r: &mut dyn Read, w: &mut dyn Write, limit: u64) -> std::io::Result<u64> {
    let mut buf = [0u8; 8192];
    let mut copied: u64 = 0;

    while copied < limit {
        let want = ((limit - copied).min(buf.len() as u64)) as usize;
        let got = r.read(&mut buf[..want])?;
        if got == 0 {
            break;
        }
        w.write_all(&buf[..got])?;
        copied += got as u64;
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn copy_up_to_stops_at_limit() {
        let src = vec![7u8; 20_000];
        let mut out = Vec::new();
        let n = copy_up_to(&mut Cursor::new(&src), &mut out, 12_345).unwrap();
        assert_eq!(n, 12_345);
        assert_eq!(out, &src[..12_345]);
    }

    #[test]
    fn copy_up_to_reports_short_source() {
        let src = vec![1u8; 100];
        let mut out = Vec::new();
        let n = copy_up_to(&mut Cursor::new(&src), &mut out, 500).unwrap();
        assert_eq!(n, 100);
        assert_eq!(out, src);
    }
}
