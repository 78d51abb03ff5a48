//! CLI subcommand implementations for the reefguard binary.

pub mod output;
pub mod rank_cmd;
pub mod scan_cmd;
