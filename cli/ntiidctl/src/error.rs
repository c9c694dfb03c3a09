//! Error handling and display for the CLI.

use colored::Colorize;
use ntiid::NtiidError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{invalid} of {total} NTIIDs failed validation")]
    InvalidNtiids { invalid: usize, total: usize },

    #[error(transparent)]
    Ntiid(#[from] NtiidError),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(hint) = hint_for(err) {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}

fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    let ntiid_err = err.downcast_ref::<NtiidError>().or_else(|| {
        err.downcast_ref::<CliError>().and_then(|cli_err| match cli_err {
            CliError::Ntiid(inner) => Some(inner),
            CliError::InvalidNtiids { .. } => None,
        })
    })?;

    match ntiid_err {
        NtiidError::InvalidFormat { .. } => {
            Some("NTIIDs look like `tag:nextthought.com,2011-10:NTI-HTML-example`.")
        }
        NtiidError::MissingRequiredField { field: "provider" } => {
            Some("A specific part needs a provider. Pass --provider or set NTIID_PROVIDER.")
        }
        NtiidError::MissingRequiredField { .. } => Some("Pass --type to name the object kind."),
        NtiidError::UnrepresentableInput { .. } => {
            Some("The text has no ASCII letters or digits to keep. Use `ntiid truncate` instead.")
        }
        NtiidError::Resolver(_) => None,
    }
}
