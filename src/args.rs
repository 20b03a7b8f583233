//! These structs provide the CLI interface for the expenses CLI.

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

/// expenses: A command-line tool for browsing employee expense transactions.
///
/// The program serves the transaction feed page-by-page, filters it down to a single employee,
/// and toggles per-transaction approvals. Data comes from the built-in deterministic data
/// service; there is no network transport and nothing persists between runs.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the employee directory, including the "All Employees" filter entry.
    Employees,
    /// Browse transactions: load the feed, optionally filter it to one employee, page through
    /// it, and apply approval changes.
    Browse(BrowseArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl Common {
    pub fn new(log_level: LevelFilter) -> Self {
        Self { log_level }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

/// Args for the `expenses browse` command.
#[derive(Debug, Parser, Clone)]
pub struct BrowseArgs {
    /// Filter the list down to this employee id, e.g. emp-001. Without it the full paginated
    /// feed is shown.
    #[arg(long)]
    employee: Option<String>,

    /// How many additional pages of the full feed to load after the first. Ignored when
    /// --employee is given, since the per-employee list is not paginated.
    #[arg(long, default_value_t = 0)]
    pages: u32,

    /// Transaction ids to mark approved, e.g. --approve txn-001 --approve txn-002.
    #[arg(long)]
    approve: Vec<String>,

    /// Transaction ids to mark not approved.
    #[arg(long)]
    deny: Vec<String>,

    /// How many transactions each page of the full feed contains.
    #[arg(long, default_value_t = 5)]
    page_size: usize,
}

impl BrowseArgs {
    pub fn new(
        employee: Option<String>,
        pages: u32,
        approve: Vec<String>,
        deny: Vec<String>,
        page_size: usize,
    ) -> Self {
        Self {
            employee,
            pages,
            approve,
            deny,
            page_size,
        }
    }

    pub fn employee(&self) -> Option<&str> {
        self.employee.as_deref()
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn approve(&self) -> &[String] {
        &self.approve
    }

    pub fn deny(&self) -> &[String] {
        &self.deny
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}
