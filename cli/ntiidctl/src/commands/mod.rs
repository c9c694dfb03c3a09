//! CLI commands.

mod config;
mod hash;
mod make;
mod parse;
mod safe;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// ntiid - Build, parse, and inspect NextThought identifiers.
#[derive(Debug, Parser)]
#[command(name = "ntiid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, env = "NTIID_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Split an NTIID into its parts.
    Parse(parse::ParseCommand),

    /// Check NTIIDs against the grammar.
    Validate(validate::ValidateCommand),

    /// Build an NTIID from parts.
    Make(make::MakeCommand),

    /// Escape text for use inside an NTIID.
    Safe(safe::SafeCommand),

    /// Replace an NTIID's specific part with a digest.
    Hash(hash::HashCommand),

    /// Replace overlong specific text with a bounded digest.
    Truncate(hash::TruncateCommand),

    /// Show the effective configuration.
    Config(config::ConfigCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Whether logs should be written as JSON.
    pub fn log_json(&self) -> bool {
        self.log_json
    }

    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let ctx = CommandContext {
            config: Config::load()?,
            format: OutputFormat::from_flag(&self.format),
        };

        match self.command {
            Commands::Parse(cmd) => cmd.run(ctx),
            Commands::Validate(cmd) => cmd.run(ctx),
            Commands::Make(cmd) => cmd.run(ctx),
            Commands::Safe(cmd) => cmd.run(ctx),
            Commands::Hash(cmd) => cmd.run(ctx),
            Commands::Truncate(cmd) => cmd.run(ctx),
            Commands::Config(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("ntiid {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_make_flags() {
        let cli = Cli::try_parse_from([
            "ntiid", "make", "--type", "HTML", "--provider", "NTI", "--specific", "intro",
            "--date", "2023-05-01",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Make(_)));
    }

    #[test]
    fn test_make_requires_type() {
        assert!(Cli::try_parse_from(["ntiid", "make", "--provider", "NTI"]).is_err());
    }

    #[test]
    fn test_date_conflicts_with_timestamp() {
        let result = Cli::try_parse_from([
            "ntiid", "make", "--type", "HTML", "--date", "2023-05-01", "--timestamp", "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::try_parse_from(["ntiid", "parse", ntiid::ROOT, "--format", "json"]).unwrap();
        assert_eq!(OutputFormat::from_flag(&cli.format), OutputFormat::Json);
    }

    #[test]
    fn test_validate_needs_input() {
        assert!(Cli::try_parse_from(["ntiid", "validate"]).is_err());
    }
}
