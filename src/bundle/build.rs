#![forbid(unsafe_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::bundle::error::{io_stage, BundleError, BundleResult};
use crate::bundle::format::write_footer;
use crate::bundle::locate::{scratch_dir, scratch_prefix, self_exe};
use crate::bundle::runtime::Compiler;

/// Build a self-contained bundle from `script`, using the running binary
/// as the stub.
pub fn build(compiler: &dyn Compiler, script: &Path, output: &Path) -> BundleResult<()> {
    let stub = self_exe()?;
    build_from_stub(compiler, &stub, script, output)
}

/// Produce `output` as `[stub bytes][compiled payload][footer]` and mark it
/// executable.
///
/// Compilation happens before `output` is created, so a compile failure
/// never leaves a file behind. An I/O failure after the stub copy began
/// does leave a partial `output`; callers wanting atomic replacement should
/// build to a scratch path and rename. The compiled artifact itself lives
/// in a scratch temp file that is removed on every return path.
pub fn build_from_stub(
    compiler: &dyn Compiler,
    stub: &Path,
    script: &Path,
    output: &Path,
) -> BundleResult<()> {
    let artifact = tempfile::Builder::new()
        .prefix(&scratch_prefix())
        .suffix(".pyc")
        .tempfile_in(scratch_dir())
        .map_err(io_stage("create scratch artifact"))?;

    compiler.compile(script, artifact.path())?;

    // Reject an empty artifact before `output` exists; compile failures
    // must never leave a caller-visible file behind. Stat by path, not by
    // handle: the compiler may have replaced the inode.
    let artifact_len = std::fs::metadata(artifact.path())
        .map_err(io_stage("stat artifact"))?
        .len();
    if artifact_len == 0 {
        return Err(BundleError::Compile(
            "compiler produced an empty artifact".into(),
        ));
    }

    let mut stub_in = File::open(stub).map_err(io_stage("open stub"))?;
    let mut out = File::create(output).map_err(io_stage("create output"))?;

    std::io::copy(&mut stub_in, &mut out).map_err(io_stage("copy stub"))?;

    let mut pyc = File::open(artifact.path()).map_err(io_stage("open artifact"))?;
    let payload_size = std::io::copy(&mut pyc, &mut out).map_err(io_stage("append payload"))?;

    write_footer(&mut out, payload_size)?;
    out.flush().map_err(io_stage("flush output"))?;
    drop(out);

    mark_executable(output)
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> BundleResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)
        .map_err(io_stage("stat output"))?
        .permissions();
    perms.set_mode(perms.mode() | 0o755);
    std::fs::set_permissions(path, perms).map_err(io_stage("chmod output"))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> BundleResult<()> {
    // no execute bit to set on this platform
    Ok(())
}
