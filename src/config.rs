use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PRICE_ENDPOINT: &str = "https://api.coingecko.com/api/v3/simple/price";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tick_millis: u64,
    pub process_ttl_millis: u64,
    pub top_processes: usize,
    pub feed_refresh_seconds: u64,
    pub feed_timeout_seconds: u64,
    pub cache_seconds: u64,
    pub repo_path: PathBuf,
    pub log_file: Option<PathBuf>,
    pub weather: WeatherConfig,
    pub prices: PriceConfig,
    pub alerts: AlertsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    pub endpoint: String,
    pub tickers: Vec<TickerConfig>,
}

/// One tracked symbol: `id` is the price feed key, `symbol` is what gets drawn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TickerConfig {
    pub id: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub temperature_crit_c: f64,
    pub cpu_crit_pct: f64,
    pub memory_crit_pct: f64,
    pub storage_crit_pct: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_millis: 120,
            process_ttl_millis: 2_000,
            top_processes: 3,
            feed_refresh_seconds: 60,
            feed_timeout_seconds: 10,
            cache_seconds: 300,
            repo_path: PathBuf::from("."),
            log_file: None,
            weather: WeatherConfig::default(),
            prices: PriceConfig::default(),
            alerts: AlertsConfig::default(),
        }
    }
}

impl Default for PriceConfig {
    fn default() -> Self {
        let ticker = |id: &str, symbol: &str| TickerConfig {
            id: id.to_string(),
            symbol: symbol.to_string(),
        };
        Self {
            endpoint: DEFAULT_PRICE_ENDPOINT.to_string(),
            tickers: vec![
                ticker("bitcoin", "BTC"),
                ticker("ethereum", "ETH"),
                ticker("solana", "SOL"),
                ticker("dogecoin", "DOGE"),
            ],
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            temperature_crit_c: 75.0,
            cpu_crit_pct: 90.0,
            memory_crit_pct: 90.0,
            storage_crit_pct: 90.0,
        }
    }
}

impl Config {
    /// Load from `explicit` if given, otherwise from the first existing default
    /// location, otherwise fall back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path)
                .with_context(|| format!("failed loading config from {}", path.display()));
        }

        let mut candidates = vec![PathBuf::from("termdash.toml")];

        if let Some(mut dir) = dirs::config_dir() {
            dir.push("termdash");
            dir.push("config.toml");
            candidates.push(dir);
        }

        for path in candidates {
            if path.exists() {
                return Self::from_file(&path)
                    .with_context(|| format!("failed loading config from {}", path.display()));
            }
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let cfg = toml::from_str::<Self>(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Where the log file goes when `log_file` is not set.
    pub fn log_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.log_file {
            return Some(path.clone());
        }
        dirs::cache_dir().map(|mut dir| {
            dir.push("termdash");
            dir.push("termdash.log");
            dir
        })
    }

    fn validate(&self) -> Result<()> {
        if self.tick_millis == 0 {
            anyhow::bail!("tick_millis must be > 0");
        }
        if self.process_ttl_millis == 0 {
            anyhow::bail!("process_ttl_millis must be > 0");
        }
        if self.top_processes == 0 {
            anyhow::bail!("top_processes must be > 0");
        }
        if self.feed_refresh_seconds == 0 {
            anyhow::bail!("feed_refresh_seconds must be > 0");
        }
        for (name, pct) in [
            ("cpu_crit_pct", self.alerts.cpu_crit_pct),
            ("memory_crit_pct", self.alerts.memory_crit_pct),
            ("storage_crit_pct", self.alerts.storage_crit_pct),
        ] {
            if !(pct > 0.0 && pct <= 100.0) {
                anyhow::bail!("{name} ({pct}) must be within (0, 100]");
            }
        }
        if let Some(t) = self
            .prices
            .tickers
            .iter()
            .find(|t| t.id.trim().is_empty() || t.symbol.trim().is_empty())
        {
            anyhow::bail!("ticker entries need both id and symbol (got {t:?})");
        }
        Ok(())
    }
}
