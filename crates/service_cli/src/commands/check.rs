//! Check command implementation
//!
//! Validates the effective configuration and prints it.

use serde::Serialize;

use super::Context;
use crate::config::{AppConfig, ConfigError};
use crate::error::Result;
use crate::output::{to_json, OutputFormat};

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    version: &'static str,
    status: &'static str,
    config: &'a AppConfig,
}

/// Run the check command
pub fn run(ctx: &Context) -> Result<String> {
    ctx.config.validate()?;
    let report = CheckReport {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
        config: &ctx.config,
    };
    match ctx.format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Table => {
            let effective = toml::to_string_pretty(&ctx.config)
                .map_err(|e| ConfigError::FileError(format!("Failed to render TOML: {}", e)))?;
            Ok(format!(
                "fxhedge {} configuration OK\n\n{}",
                report.version, effective
            ))
        }
    }
}
