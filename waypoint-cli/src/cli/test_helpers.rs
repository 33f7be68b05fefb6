//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::{CliError, RunCommand, commands::run_command};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_catalog_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// `run` options matching the CLI defaults, with a fixed seed.
pub(super) fn seeded_run(seed: u64) -> RunCommand {
    RunCommand {
        nodes: 5,
        probability: 0.5,
        cost_min: 1,
        cost_max: 10,
        max_tries: 100,
        directed: false,
        connectivity: super::ConnectivityArg::Tour,
        strategy: super::StrategyArg::Sequential,
        max_nodes: 10,
        seed: Some(seed),
        catalog: None,
    }
}

pub(super) fn run_command_expecting_error(cmd: RunCommand, panic_msg: &str) -> CliError {
    match run_command(cmd) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
