//! CLI subcommand implementations.

pub mod employees;
pub mod events;
pub mod export;
pub mod init;
pub mod prune;
pub mod report;
pub mod scan;
pub mod status;
pub mod util;
pub mod watch;
