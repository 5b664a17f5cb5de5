//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigSortOrder};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum SortOrder {
    /// Participant order (default)
    #[default]
    Asc,
    /// Reversed participant order
    Desc,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "msgstats")]
#[command(about = "Conversation statistics for exported chat logs", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Export file, or directory containing message_*.json files
    #[arg(short, long, global = true, default_value = ".")]
    pub(crate) input: PathBuf,

    /// Only count messages after this date (YYYYMMDD or YYYY-MM-DD)
    #[arg(short, long, global = true)]
    pub(crate) since: Option<String>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Participant row order in tables
    #[arg(short, long, global = true, value_enum, default_value = "asc")]
    pub(crate) order: SortOrder,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Timezone for bucketing and display (e.g., "Europe/Stockholm", "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.json && config.json {
            self.json = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }
        if self.order == SortOrder::Asc
            && let Some(order) = config.order
        {
            self.order = match order {
                ConfigSortOrder::Asc => SortOrder::Asc,
                ConfigSortOrder::Desc => SortOrder::Desc,
            };
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli::parse_from(["msgstats"])
    }

    #[test]
    fn defaults() {
        let cli = bare_cli();
        assert!(cli.command.is_none());
        assert!(!cli.json);
        assert_eq!(cli.order, SortOrder::Asc);
        assert_eq!(cli.input, PathBuf::from("."));
    }

    #[test]
    fn config_fills_unset_values() {
        let config = Config {
            json: true,
            no_color: true,
            order: Some(ConfigSortOrder::Desc),
            timezone: Some("UTC".to_string()),
        };
        let cli = bare_cli().with_config(&config);
        assert!(cli.json);
        assert!(cli.no_color);
        assert_eq!(cli.order, SortOrder::Desc);
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
    }

    #[test]
    fn cli_takes_precedence_over_config() {
        let config = Config {
            timezone: Some("UTC".to_string()),
            order: Some(ConfigSortOrder::Desc),
            ..Config::default()
        };
        let cli = Cli::parse_from(["msgstats", "--timezone", "Europe/Stockholm"])
            .with_config(&config);
        assert_eq!(cli.timezone.as_deref(), Some("Europe/Stockholm"));
        // order was left at default, so config applies
        assert_eq!(cli.order, SortOrder::Desc);
    }

    #[test]
    fn no_color_flag_wins() {
        let cli = Cli::parse_from(["msgstats", "--no-color", "--color", "always"]);
        assert!(!cli.use_color());
    }
}
