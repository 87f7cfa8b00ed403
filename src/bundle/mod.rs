#![forbid(unsafe_code)]

mod build;
mod error;
mod extract;
mod format;
mod io;
mod locate;
mod read;
mod runtime;

pub use error::{BundleError, BundleResult};

pub use build::{build, build_from_stub};
pub use extract::{extract_payload, extract_self_payload};
pub use locate::self_exe;
pub use runtime::{Compiler, PythonToolchain, Runtime};
