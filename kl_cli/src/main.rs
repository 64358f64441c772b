
extern crate kl_dense_fsa;

mod options;
mod report;

use std::io::{self, BufRead, Write};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use kl_dense_fsa::Compiler;
use options::{Format, Options};

/// Compiles one regex and prints it. Returns false if the compilation failed,
/// in which case nothing but the error is printed.
fn run<W: Write>(compiler: &mut Compiler, format: Format, source: &str, out: &mut W) -> Result<bool> {
    match compiler.compile(source) {
        Ok(c) => {
            info!("compiled {:?}", source);
            match format {
                Format::Text => report::write_text(out, source, &c)?,
                Format::Json => report::write_json(out, source, &c)?,
            }
            Ok(true)
        },

        Err(err) => {
            eprintln!("Err: {:?} failed during {}: {}", source, err.stage(), err);
            Ok(false)
        },
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let options = Options::parse();
    let mut compiler = Compiler::new(options.config()?);
    info!("configuration: {:?}", compiler.config());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut all_ok = true;

    if let Some(source) = &options.regex {
        all_ok &= run(&mut compiler, options.format, source, &mut out)?;
    }
    else {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("failed to read stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            all_ok &= run(&mut compiler, options.format, &line, &mut out)?;
            out.flush()?;
        }
    }

    if !all_ok {
        std::process::exit(1);
    }
    Ok(())
}
