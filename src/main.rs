#![forbid(unsafe_code)]

mod bundle;

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use bundle::{PythonToolchain, Runtime};

const BUILD_USAGE: &str = "usage: pybundle --build <script.py> <output>";

/// Arguments accepted after the `--build` flag.
#[derive(Debug, Parser)]
#[command(
    name = "pybundle --build",
    about = "Build a self-contained executable from a Python script"
)]
struct BuildArgs {
    /// Python source script to embed.
    script: PathBuf,
    /// Output executable to produce.
    output: PathBuf,
}

fn main() {
    let args: Vec<OsString> = std::env::args_os().collect();

    // Two entry states: a literal `--build` flag selects builder mode,
    // every other invocation shape runs the embedded payload.
    let code = match args.get(1).and_then(|a| a.to_str()) {
        Some("--build") => build_mode(&args[2..]),
        _ => run_mode(),
    };
    std::process::exit(code);
}

fn build_mode(rest: &[OsString]) -> i32 {
    let argv = std::iter::once(OsString::from("pybundle --build")).chain(rest.iter().cloned());
    let args = match BuildArgs::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return 2;
        }
    };

    println!("compiling {}", args.script.display());
    let toolchain = PythonToolchain::from_env();
    match bundle::build(&toolchain, &args.script, &args.output) {
        Ok(()) => {
            println!("built {}", args.output.display());
            0
        }
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

fn run_mode() -> i32 {
    let artifact = match bundle::extract_self_payload() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{BUILD_USAGE}");
            return e.exit_code();
        }
    };

    // `artifact` is deleted when it drops, on every path out of here.
    let toolchain = PythonToolchain::from_env();
    match toolchain.execute(&artifact) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
