//! Command implementations and argument parsing for the waypoint CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use waypoint_core::{
    CatalogError, ConnectivityCheck, DEFAULT_NODE_CEILING, NodeCatalog, Orientation,
    PlannerBuilder, SearchStrategy, TourPlan, WaypointError,
};

const DEFAULT_NODES: usize = 5;
const DEFAULT_PROBABILITY: f64 = 0.5;
const DEFAULT_COST_MIN: u64 = 1;
const DEFAULT_COST_MAX: u64 = 10;
const DEFAULT_MAX_TRIES: usize = 100;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "waypoint",
    about = "Plan the cheapest tour through a randomly connected set of locations."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Synthesize a connected graph and search it for the cheapest full path.
    Run(RunCommand),
    /// List the locations available for sampling.
    Catalog(CatalogCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Number of locations to sample; clamped to the catalog size.
    #[arg(long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Probability that each ordered pair of locations gets an edge.
    #[arg(long, default_value_t = DEFAULT_PROBABILITY)]
    pub probability: f64,

    /// Inclusive lower bound for edge costs.
    #[arg(long = "cost-min", default_value_t = DEFAULT_COST_MIN)]
    pub cost_min: u64,

    /// Exclusive upper bound for edge costs.
    #[arg(long = "cost-max", default_value_t = DEFAULT_COST_MAX)]
    pub cost_max: u64,

    /// Synthesis attempts before giving up.
    #[arg(long = "max-tries", default_value_t = DEFAULT_MAX_TRIES)]
    pub max_tries: usize,

    /// Keep generated edges one-way instead of mirroring them.
    #[arg(long)]
    pub directed: bool,

    /// Connectivity test applied to each synthesized graph.
    #[arg(long, value_enum, default_value_t = ConnectivityArg::Tour)]
    pub connectivity: ConnectivityArg,

    /// How the exhaustive search is executed.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Largest node count the exhaustive search accepts.
    #[arg(long = "max-nodes", default_value_t = DEFAULT_NODE_CEILING)]
    pub max_nodes: usize,

    /// Seed for reproducible runs; drawn at random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Catalog file with one `name[<TAB>description]` entry per line.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Options accepted by the `catalog` command.
#[derive(Debug, Args, Clone)]
pub struct CatalogCommand {
    /// Catalog file to list instead of the built-in locations.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Connectivity tests selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConnectivityArg {
    /// Require some ordering of every node to be a valid path.
    Tour,
    /// Require a single undirected component.
    Reachability,
}

impl From<ConnectivityArg> for ConnectivityCheck {
    fn from(value: ConnectivityArg) -> Self {
        match value {
            ConnectivityArg::Tour => Self::Tour,
            ConnectivityArg::Reachability => Self::Reachability,
        }
    }
}

/// Search strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Let the library choose.
    Auto,
    /// Scan on the calling thread.
    Sequential,
    /// Scan on the rayon thread pool.
    Parallel,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening a catalog file failed.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A catalog file could not be parsed.
    #[error("invalid catalog `{path}`: {source}")]
    Catalog {
        /// Path of the rejected catalog.
        path: PathBuf,
        /// Validation or read failure.
        #[source]
        source: CatalogError,
    },
    /// Planning failed.
    #[error(transparent)]
    Core(#[from] WaypointError),
}

impl CliError {
    /// Returns the stable machine-readable code of the underlying failure, if
    /// it has one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } => None,
            Self::Catalog { source, .. } => Some(source.code().as_str()),
            Self::Core(core) => Some(core.code().as_str()),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// A planned tour and the seed that reproduces it.
    Tour {
        /// Seed the run was driven by.
        seed: u64,
        /// Graph, best path and attempt count.
        plan: TourPlan,
    },
    /// The catalog that `run` would sample from.
    Catalog(NodeCatalog),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the catalog or planning fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use waypoint_cli::cli::{CatalogCommand, Cli, Command, ExecutionSummary, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Catalog(CatalogCommand { catalog: None }),
/// };
/// let ExecutionSummary::Catalog(catalog) = run_cli(cli)? else {
///     panic!("catalog command must list the catalog");
/// };
/// assert_eq!(catalog.len(), 15);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
        Command::Catalog(list) => {
            Span::current().record("command", field::display("catalog"));
            Ok(ExecutionSummary::Catalog(load_catalog(list.catalog.as_deref())?))
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(nodes = command.nodes, seed = field::Empty, catalog = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let orientation = if command.directed {
        Orientation::Directed
    } else {
        Orientation::Undirected
    };
    let planner = PlannerBuilder::new()
        .with_node_count(command.nodes)
        .with_probability(command.probability)
        .with_cost_range(command.cost_min, command.cost_max)
        .with_max_tries(command.max_tries)
        .with_orientation(orientation)
        .with_connectivity(command.connectivity.into())
        .with_search_strategy(command.strategy.into())
        .with_node_ceiling(command.max_nodes)
        .build()?;

    let catalog = load_catalog(command.catalog.as_deref())?;
    let seed = command.seed.unwrap_or_else(rand::random);
    let span = Span::current();
    span.record("seed", seed);
    span.record("catalog", catalog.len());

    let mut rng = SmallRng::seed_from_u64(seed);
    let plan = planner.plan(&catalog, &mut rng)?;
    info!(
        seed,
        attempts = plan.attempts(),
        score = plan.best().score(),
        "command completed"
    );
    Ok(ExecutionSummary::Tour { seed, plan })
}

/// Loads the catalog at `path`, or the built-in catalog when `path` is `None`.
pub(super) fn load_catalog(path: Option<&Path>) -> Result<NodeCatalog, CliError> {
    let Some(path) = path else {
        return Ok(NodeCatalog::default());
    };
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    NodeCatalog::from_reader(BufReader::new(file)).map_err(|source| CliError::Catalog {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use waypoint_cli::cli::{ExecutionSummary, render_summary};
/// # use waypoint_core::NodeCatalog;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Catalog(NodeCatalog::from_names(["Oslo", "Rome"])?);
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer.into_inner())?, "locations: 2\nOslo\nRome\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Tour { seed, plan } => {
            writeln!(writer, "seed: {seed}")?;
            writeln!(writer, "attempts: {}", plan.attempts())?;
            writeln!(writer, "edges: {}", plan.graph().len())?;
            for edge in plan.graph().edges() {
                writeln!(writer, "{}\t{}\t{}", edge.from(), edge.to(), edge.cost())?;
            }
            writeln!(writer, "path: {}", plan.best().path())?;
            writeln!(writer, "score: {}", plan.best().score())?;
        }
        ExecutionSummary::Catalog(catalog) => {
            writeln!(writer, "locations: {}", catalog.len())?;
            for entry in catalog.entries() {
                match entry.metadata().description() {
                    Some(description) => writeln!(writer, "{}\t{description}", entry.name())?,
                    None => writeln!(writer, "{}", entry.name())?,
                }
            }
        }
    }
    Ok(())
}
