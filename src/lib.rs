//! edgeflip - A tab-delimited edge-list reversal utility
//!
//! This library mirrors a directory of edge files into a destination
//! directory with every well-formed line's two tab-separated fields swapped,
//! passing malformed lines through unchanged. It also provides TOML-based
//! run configuration, file selection rules, and optional JSON run reports.

pub mod cli;
pub mod config;
pub mod edge_reverser;
pub mod output;
pub mod report;

pub use config::{CompiledSelect, ConfigError, ReverseConfig, SelectRules};
pub use edge_reverser::{EdgeReverser, FileStats, ReverseError, ReverseResult, RunSummary};
pub use report::{RunReport, ReportError};

pub use cli::{Cli, run_cli};
