//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Network-presence attendance tracker.
///
/// Periodically scans the local network's ARP table and turns device
/// visibility into time-in, break, and time-out records per employee.
#[derive(Debug, Parser)]
#[command(name = "att", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the database and print its location.
    Init,

    /// Run the scan-and-reconcile loop until interrupted.
    Watch,

    /// Run a single network scan and show which devices are visible.
    Scan,

    /// Show every employee's current presence.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List recent attendance events.
    Events {
        /// Restrict to one date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Maximum number of events to show.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Show the daily summary report for a date.
    Report {
        /// Date to report on (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Export a date's summaries as CSV.
    Export {
        /// Date to export (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage the employee roster.
    Employees {
        #[command(subcommand)]
        action: EmployeesAction,
    },

    /// Delete events and summaries outside the retention window.
    Prune {
        /// Days of history to keep.
        #[arg(long, default_value_t = 30)]
        keep_days: u32,
    },
}

/// Roster management subcommands.
#[derive(Debug, Subcommand)]
pub enum EmployeesAction {
    /// Register an employee.
    Add {
        /// Display name.
        name: String,

        /// Device MAC address (any common separator).
        #[arg(long)]
        mac: String,

        /// Optional picture path or URL.
        #[arg(long)]
        picture: Option<String>,
    },

    /// List employees.
    List {
        /// Filter by name or MAC substring.
        #[arg(long)]
        search: Option<String>,
    },

    /// Remove an employee by id.
    Remove {
        /// Employee id as shown by `employees list`.
        id: i64,
    },

    /// Sync the roster from a JSON file.
    Sync {
        /// Roster file; defaults to `roster_path` from the config.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}
