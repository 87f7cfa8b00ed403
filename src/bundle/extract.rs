#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;

use tempfile::TempPath;

use crate::bundle::error::{io_stage, BundleError, BundleResult};
use crate::bundle::io::copy_up_to;
use crate::bundle::locate::{scratch_dir, scratch_prefix, self_exe};
use crate::bundle::read::locate_payload;

/// Recover the payload embedded in the running binary. The returned
/// `TempPath` deletes the scratch file when dropped, so the caller's scope
/// owns cleanup on every exit path.
pub fn extract_self_payload() -> BundleResult<TempPath> {
    let me = self_exe()?;
    extract_payload(&me)
}

/// Copy the embedded payload of `bundle` into a fresh, uniquely named
/// scratch file. The bundle is only ever read, never mutated.
pub fn extract_payload(bundle: &Path) -> BundleResult<TempPath> {
    let mut f = File::open(bundle).map_err(io_stage("open bundle"))?;
    let span = locate_payload(&mut f)?;

    f.seek(SeekFrom::Start(span.start))
        .map_err(io_stage("seek to payload"))?;

    copy_into_scratch(&mut f, span.len)
}

/// Copy `expected` bytes from `src` into a fresh scratch file. A source
/// exhausted early means the bundle shrank under us mid-read; the partial
/// artifact rides along in the error so the caller can inspect it, and is
/// still removed when the error drops.
fn copy_into_scratch(src: &mut dyn std::io::Read, expected: u64) -> BundleResult<TempPath> {
    let scratch = tempfile::Builder::new()
        .prefix(&scratch_prefix())
        .suffix(".pyc")
        .tempfile_in(scratch_dir())
        .map_err(io_stage("create scratch artifact"))?;
    let (mut out, path) = scratch.into_parts();

    let copied = copy_up_to(src, &mut out, expected).map_err(io_stage("copy payload"))?;
    drop(out);

    if copied < expected {
        return Err(BundleError::Truncated {
            expected,
            copied,
            partial: path,
        });
    }

    Ok(path)
}
