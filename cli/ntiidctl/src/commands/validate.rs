//! Validate command: check one or more NTIIDs.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_output, print_success, OutputFormat};

use super::CommandContext;

/// Check NTIIDs against the grammar; exits non-zero if any is invalid.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// NTIIDs to check.
    #[arg(required = true)]
    ntiids: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct ValidationRow {
    #[tabled(rename = "NTIID")]
    ntiid: String,
    #[tabled(rename = "VALID")]
    valid: bool,
    #[tabled(rename = "REASON")]
    reason: String,
}

impl ValidateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let rows = check_all(&self.ntiids);
        let invalid = rows.iter().filter(|row| !row.valid).count();

        if invalid > 0 || ctx.format == OutputFormat::Json {
            print_output(&rows, ctx.format);
        } else {
            print_success(&format!("{} NTIID(s) valid", rows.len()));
        }

        if invalid > 0 {
            return Err(CliError::InvalidNtiids {
                invalid,
                total: rows.len(),
            }
            .into());
        }
        Ok(())
    }
}

fn check_all(candidates: &[String]) -> Vec<ValidationRow> {
    candidates
        .iter()
        .map(|candidate| match ntiid::validate_ntiid_string(candidate) {
            Ok(()) => ValidationRow {
                ntiid: candidate.clone(),
                valid: true,
                reason: String::new(),
            },
            Err(err) => {
                tracing::debug!(candidate = %candidate, error = %err, "validation failed");
                ValidationRow {
                    ntiid: candidate.clone(),
                    valid: false,
                    reason: err.to_string(),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_all() {
        let rows = check_all(&[ntiid::ROOT.to_string(), "my ünicôdé strįng".to_string()]);
        assert!(rows[0].valid);
        assert!(!rows[1].valid);
        assert!(rows[1].reason.contains("illegal character"));
    }
}
