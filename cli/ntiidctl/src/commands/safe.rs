//! Safe command: show how text is escaped into an NTIID slot.

use anyhow::Result;
use clap::Args;
use ntiid::SafeMode;

use crate::error::CliError;
use crate::output::print_value;

use super::CommandContext;

/// Escape text for the specific (default) or provider slot.
#[derive(Debug, Args)]
pub struct SafeCommand {
    /// Text to make safe.
    text: String,

    /// Allow extra punctuation (`! $ & ( ) * + , : @ ~`).
    #[arg(long)]
    lax: bool,

    /// Escape for the provider slot instead of the specific slot.
    #[arg(long)]
    provider: bool,
}

impl SafeCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let mode = if self.lax { SafeMode::Lax } else { SafeMode::Strict };
        let safe = if self.provider {
            ntiid::make_provider_safe_with(&self.text, mode)
        } else {
            ntiid::make_specific_safe_with(&self.text, mode)
        }
        .map_err(CliError::from)?;

        print_value(&safe, ctx.format);
        Ok(())
    }
}
