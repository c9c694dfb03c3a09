//! Hash and truncate commands.

use anyhow::Result;
use clap::Args;

use crate::error::CliError;
use crate::output::print_value;

use super::CommandContext;

/// Replace an NTIID's specific part with a digest of the whole identifier.
#[derive(Debug, Args)]
pub struct HashCommand {
    /// NTIID to hash. It must have a provider.
    ntiid: String,

    /// Salt appended before hashing. Defaults to the configured salt.
    #[arg(long)]
    salt: Option<String>,
}

impl HashCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let salt = self.salt.unwrap_or_else(|| ctx.config.salt.clone());
        let hashed = ntiid::hash_ntiid(&self.ntiid, &salt).map_err(CliError::from)?;
        print_value(hashed.as_str(), ctx.format);
        Ok(())
    }
}

/// Produce the fixed-width replacement for an overlong specific part.
#[derive(Debug, Args)]
pub struct TruncateCommand {
    /// Specific text to replace.
    specific: String,

    /// Salt appended before hashing. Defaults to the configured salt.
    #[arg(long)]
    salt: Option<String>,
}

impl TruncateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let salt = self.salt.unwrap_or_else(|| ctx.config.salt.clone());
        print_value(&ntiid::hash_and_truncate(&self.specific, &salt), ctx.format);
        Ok(())
    }
}
