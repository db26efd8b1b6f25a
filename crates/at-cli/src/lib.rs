//! Attendance tracker CLI library.
//!
//! This crate provides the CLI interface for the attendance tracker.

pub mod arp;
mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, EmployeesAction};
pub use config::Config;
