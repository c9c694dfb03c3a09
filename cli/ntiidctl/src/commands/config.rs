//! Config command: show effective settings.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::config::{config_path, Config};
use crate::output::{print_info, print_single, OutputFormat};

use super::CommandContext;

/// Show the effective configuration (file plus environment).
#[derive(Debug, Args)]
pub struct ConfigCommand {}

/// Effective settings as shown to the user. The salt itself is never printed.
#[derive(Debug, Serialize)]
struct ConfigView<'a> {
    path: PathBuf,
    provider: Option<&'a str>,
    salt_set: bool,
    max_specific_len: Option<usize>,
}

impl<'a> ConfigView<'a> {
    fn new(config: &'a Config, path: PathBuf) -> Self {
        Self {
            path,
            provider: config.provider.as_deref(),
            salt_set: !config.salt.is_empty(),
            max_specific_len: config.max_specific_len,
        }
    }
}

impl ConfigCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let view = ConfigView::new(&ctx.config, config_path()?);
        match ctx.format {
            OutputFormat::Json => print_single(&view),
            OutputFormat::Table => {
                print_info(&format!("config file: {}", view.path.display()));
                println!("provider: {}", view.provider.unwrap_or("-"));
                println!("salt: {}", if view.salt_set { "(set)" } else { "-" });
                match view.max_specific_len {
                    Some(max) => println!("max_specific_len: {max}"),
                    None => println!("max_specific_len: -"),
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_hides_salt() {
        let config = Config {
            provider: Some("NTI".to_string()),
            salt: "pepper".to_string(),
            max_specific_len: Some(120),
        };
        let view = ConfigView::new(&config, PathBuf::from("/tmp/config.json"));
        let json = serde_json::to_string(&view).unwrap();

        assert!(!json.contains("pepper"), "{json}");
        assert!(json.contains(r#""salt_set":true"#), "{json}");
        assert!(json.contains(r#""provider":"NTI""#), "{json}");
    }
}
