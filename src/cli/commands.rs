//! CLI subcommand definitions

use clap::Subcommand;

/// Report sections. Without a subcommand the full report is printed.
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show totals, time span, and averages
    Summary,
    /// Show per-participant message and word counts
    Messages,
    /// Show hour, weekday, and day histograms
    Timeline,
    /// Show per-participant emoji usage
    Emojis,
    /// Show per-participant reaction usage
    Reactions,
}
