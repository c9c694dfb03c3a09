//! Make command: build an NTIID from parts.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use ntiid::{NtiidBuilder, NtiidDate};

use crate::error::CliError;
use crate::output::print_value;

use super::CommandContext;

/// Build an NTIID. Provider and specific text are safed first.
#[derive(Debug, Args)]
pub struct MakeCommand {
    /// Object type tag (e.g. HTML, OID, NamedEntity:User).
    #[arg(long = "type", value_name = "TYPE")]
    nttype: String,

    /// Issuing provider. Defaults to the configured provider.
    #[arg(long)]
    provider: Option<String>,

    /// Specific part.
    #[arg(long)]
    specific: Option<String>,

    /// Calendar day (YYYY-MM-DD). Defaults to today in UTC.
    #[arg(long, conflicts_with = "timestamp")]
    date: Option<NaiveDate>,

    /// Unix timestamp in seconds, converted in UTC.
    #[arg(long, allow_negative_numbers = true)]
    timestamp: Option<f64>,

    /// Hash specific parts longer than this many characters.
    #[arg(long)]
    max_specific: Option<usize>,

    /// Salt for hashing overlong specific parts.
    #[arg(long)]
    salt: Option<String>,
}

impl MakeCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let builder = self.builder(&ctx);
        let id = builder.build().map_err(CliError::from)?;
        tracing::info!(ntiid = %id, "made ntiid");
        print_value(id.as_str(), ctx.format);
        Ok(())
    }

    fn builder(self, ctx: &CommandContext) -> NtiidBuilder {
        let date = match (self.date, self.timestamp) {
            (Some(day), _) => NtiidDate::Day(day),
            (None, Some(secs)) => NtiidDate::Timestamp(secs),
            (None, None) => NtiidDate::Today,
        };

        let mut builder = NtiidBuilder::new().nttype(self.nttype).date(date);
        if let Some(provider) = self.provider.or_else(|| ctx.config.provider.clone()) {
            builder = builder.provider(provider);
        }
        if let Some(specific) = self.specific {
            builder = builder.specific(specific);
        }
        if let Some(max) = self.max_specific.or(ctx.config.max_specific_len) {
            let salt = self.salt.unwrap_or_else(|| ctx.config.salt.clone());
            builder = builder.max_specific_len(max, salt);
        }
        builder
    }
}
