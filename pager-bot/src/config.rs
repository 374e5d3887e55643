//! Environment-driven configuration.

use std::env;

use anyhow::Context as _;

use pager_core::{NavigationMode, PaginatorSettings};

/// Everything the binary reads from the environment at startup.
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub token: String,
    pub settings: PaginatorSettings,
}

impl BotConfig {
    /// Read `DISCORD_TOKEN` and the `PAGER_*` overrides.
    pub fn from_env() -> anyhow::Result<Self> {
        let token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;
        let settings = settings_from(|key| env::var(key).ok())?;

        Ok(Self { token, settings })
    }
}

fn parse_flag(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{key} must be a boolean, got `{other}`"),
    }
}

/// Paginator defaults with any `PAGER_*` variables applied on top.
pub fn settings_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<PaginatorSettings> {
    let mut settings = PaginatorSettings::default();

    if let Some(raw) = lookup("PAGER_MODE") {
        settings.mode = raw
            .parse::<NavigationMode>()
            .map_err(|reason| anyhow::anyhow!("PAGER_MODE: {reason}"))?;
    }
    if let Some(raw) = lookup("PAGER_TIMEOUT_SECS") {
        settings.timeout_secs = raw
            .trim()
            .parse()
            .with_context(|| format!("PAGER_TIMEOUT_SECS `{raw}` is not a number of seconds"))?;
    }
    if let Some(raw) = lookup("PAGER_SINGLE_USER") {
        settings.single_user_mode = parse_flag("PAGER_SINGLE_USER", &raw)?;
    }
    if let Some(raw) = lookup("PAGER_DELETE_ON_END") {
        settings.delete_on_end = parse_flag("PAGER_DELETE_ON_END", &raw)?;
    }

    Ok(settings)
}
