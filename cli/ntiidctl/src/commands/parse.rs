//! Parse command: split an NTIID into its parts.

use anyhow::Result;
use clap::Args;
use ntiid::Ntiid;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_output, print_single, OutputFormat};

use super::CommandContext;

/// Show the date, provider, type and specific part of an NTIID.
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// The NTIID to parse.
    ntiid: String,
}

#[derive(Debug, Serialize)]
struct ParsedView<'a> {
    ntiid: &'a Ntiid,
    date: &'a str,
    provider: Option<&'a str>,
    nttype: &'a str,
    specific: Option<&'a str>,
    root: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "FIELD")]
    field: &'static str,
    #[tabled(rename = "VALUE")]
    value: String,
}

impl ParseCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let id = Ntiid::parse(&self.ntiid).map_err(CliError::from)?;
        let view = ParsedView {
            ntiid: &id,
            date: id.date_token(),
            provider: id.provider(),
            nttype: id.nttype(),
            specific: id.specific(),
            root: id.is_root(),
        };

        match ctx.format {
            OutputFormat::Json => print_single(&view),
            OutputFormat::Table => print_output(&field_rows(&view), ctx.format),
        }
        Ok(())
    }
}

fn field_rows(view: &ParsedView<'_>) -> Vec<FieldRow> {
    let or_dash = |v: Option<&str>| v.unwrap_or("-").to_string();
    vec![
        FieldRow {
            field: "date",
            value: view.date.to_string(),
        },
        FieldRow {
            field: "provider",
            value: or_dash(view.provider),
        },
        FieldRow {
            field: "nttype",
            value: view.nttype.to_string(),
        },
        FieldRow {
            field: "specific",
            value: or_dash(view.specific),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_rows_mark_absent_parts() {
        let id = Ntiid::parse(ntiid::ROOT).unwrap();
        let view = ParsedView {
            ntiid: &id,
            date: id.date_token(),
            provider: id.provider(),
            nttype: id.nttype(),
            specific: id.specific(),
            root: id.is_root(),
        };
        let rows = field_rows(&view);
        assert_eq!(rows[1].value, "-");
        assert_eq!(rows[2].value, "Root");
        assert_eq!(rows[3].value, "-");
    }
}
