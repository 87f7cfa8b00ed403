#![forbid(unsafe_code)]

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::bundle::error::{io_stage, BundleError, BundleResult};

/// Turns a script source file into a compiled artifact.
pub trait Compiler {
    fn compile(&self, script: &Path, artifact: &Path) -> BundleResult<()>;
}

/// Executes a compiled artifact, yielding the child's exit code.
pub trait Runtime {
    fn execute(&self, artifact: &Path) -> BundleResult<i32>;
}

/// The system Python interpreter, used both to compile scripts (via
/// `py_compile`) and to run the extracted `.pyc`. The interpreter itself
/// understands the artifact's compiled-file header; we never parse it.
pub struct PythonToolchain {
    interpreter: OsString,
}

const COMPILE_SNIPPET: &str =
    "import py_compile, sys; py_compile.compile(sys.argv[1], cfile=sys.argv[2], doraise=True)";

impl PythonToolchain {
    /// `python3`, unless `PYBUNDLE_PYTHON` points somewhere else.
    pub fn from_env() -> Self {
        let interpreter =
            std::env::var_os("PYBUNDLE_PYTHON").unwrap_or_else(|| OsString::from("python3"));
        Self { interpreter }
    }
}

impl Compiler for PythonToolchain {
    fn compile(&self, script: &Path, artifact: &Path) -> BundleResult<()> {
        let out = Command::new(&self.interpreter)
            .arg("-c")
            .arg(COMPILE_SNIPPET)
            .arg(script)
            .arg(artifact)
            .output()
            .map_err(io_stage("spawn compiler"))?;

        if !out.status.success() {
            let msg = String::from_utf8_lossy(&out.stderr).trim().to_string();
            if msg.is_empty() {
                return Err(BundleError::Compile(format!(
                    "compiler exited with {}",
                    out.status
                )));
            }
            return Err(BundleError::Compile(msg));
        }
        Ok(())
    }
}

impl Runtime for PythonToolchain {
    fn execute(&self, artifact: &Path) -> BundleResult<i32> {
        let status = Command::new(&self.interpreter)
            .arg(artifact)
            .status()
            .map_err(io_stage("spawn runtime"))?;

        match status.code() {
            Some(code) => Ok(code),
            // killed by a signal; no exit code to propagate
            None => Err(BundleError::Runtime(127)),
        }
    }
}
