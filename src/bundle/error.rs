#![forbid(unsafe_code)]

use tempfile::TempPath;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("io during {stage}: {source}")]
    Io {
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot resolve path of running executable")]
    SelfPath,

    #[error("compile failed: {0}")]
    Compile(String),

    #[error("no embedded payload in this binary")]
    NoPayload,

    #[error("file too short to carry a footer")]
    TooShortForFooter,

    #[error("footer declares an empty payload")]
    EmptyPayload,

    #[error("footer declares a payload larger than the file")]
    CorruptFooter,

    #[error("payload truncated: copied {copied} of {expected} bytes")]
    Truncated {
        expected: u64,
        copied: u64,
        /// Best-effort partial artifact; removed when this error is dropped.
        partial: TempPath,
    },

    #[error("runtime terminated abnormally (code {0})")]
    Runtime(i32),
}

impl BundleError {
    /// Process exit code for this failure. Each kind gets a distinct
    /// nonzero code so callers can tell the stages apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            BundleError::Io { .. } => 1,
            BundleError::Compile(_) => 2,
            BundleError::SelfPath => 3,
            BundleError::TooShortForFooter => 4,
            BundleError::NoPayload => 5,
            BundleError::EmptyPayload => 6,
            BundleError::CorruptFooter => 7,
            BundleError::Truncated { .. } => 8,
            BundleError::Runtime(code) => *code,
        }
    }
}

/// Tag an I/O error with the stage it happened in.
pub(crate) fn io_stage(stage: &'static str) -> impl FnOnce(std::io::Error) -> BundleError {
    move |source| BundleError::Io { stage, source }
}

pub type BundleResult<T> = Result<T, BundleError>;
