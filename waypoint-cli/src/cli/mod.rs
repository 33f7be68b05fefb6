//! Command-line interface orchestration for the waypoint planner.
//!
//! `run` synthesizes a connected graph over a node catalog and reports its
//! cheapest full path; `catalog` lists the nodes a run would sample from.

mod commands;

pub use commands::{
    CatalogCommand, Cli, CliError, Command, ConnectivityArg, ExecutionSummary, RunCommand,
    StrategyArg, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
