use anyhow::Context;
use chrono::Duration;
use chrono_tz::Tz;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;

pub const DEFAULT_SOURCE_URL: &str = "http://3.20.162.22:6789/temperatures/v2.0";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub source: SourceSettings,
    pub server: ServerSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    pub title: String,
    pub timezone: String,
    pub window_days: i64,
}

impl SourceSettings {
    pub fn timeout(&self) -> Option<std::time::Duration> {
        self.timeout_secs.map(std::time::Duration::from_secs)
    }
}

impl DisplaySettings {
    /// IANA zone used for labels and for timestamps without an offset.
    pub fn timezone(&self) -> anyhow::Result<Tz> {
        self.timezone
            .parse()
            .with_context(|| format!("unknown timezone: {}", self.timezone))
    }

    pub fn window(&self) -> anyhow::Result<Duration> {
        if self.window_days <= 0 {
            anyhow::bail!("window_days must be positive, got {}", self.window_days);
        }
        Duration::try_days(self.window_days)
            .with_context(|| format!("window_days out of range: {}", self.window_days))
    }
}

/// Defaults, then `config/dashboard.*` if present, then `DASHBOARD__*` variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(environment());

    build_config(builder)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD").separator("__")
}

fn build_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<DashboardConfig> {
    let settings = builder
        .set_default("source.url", DEFAULT_SOURCE_URL)?
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("display.title", "Cluny Street Brewery")?
        .set_default("display.timezone", "UTC")?
        .set_default("display.window_days", 7_i64)?
        .build()?;

    Ok(settings.try_deserialize()?)
}
