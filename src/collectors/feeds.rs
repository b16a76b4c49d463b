//! Network- and subprocess-backed feeds (git branch, weather, prices).
//!
//! These run on a tokio task so a slow endpoint never holds up a frame. Each
//! round is published whole through a `watch` channel and the frame loop picks
//! up the newest round at the start of a tick.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::Config;

use super::cache::{FeedCache, apply_feed_cache};
use super::provider::{EnvironmentProvider, PriceProvider};
use super::types::{FeedSnapshot, PriceMap};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Command(String),
    #[error("unexpected payload: {0}")]
    Payload(String),
    #[error("timed out after {0}s")]
    Timeout(u64),
}

/// One round of raw fetch results, before fallback to cached values.
#[derive(Debug)]
pub struct FeedUpdate {
    pub git_branch: Result<String, FeedError>,
    pub weather: Result<String, FeedError>,
    pub prices: Result<PriceMap, FeedError>,
}

/// Spawn the feed task on the current tokio runtime and return the board the
/// frame loop reads from.
pub fn spawn_feeds(cfg: &Config) -> FeedBoard {
    let (tx, rx) = watch::channel(FeedSnapshot::default());
    let cfg = cfg.clone();

    tokio::spawn(async move {
        let client = match reqwest::Client::builder()
            .user_agent(concat!("termdash/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(cfg.feed_timeout_seconds.max(1)))
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                tracing::error!(error = %err, "failed to build http client, feeds disabled");
                return;
            }
        };

        let mut interval =
            tokio::time::interval(Duration::from_secs(cfg.feed_refresh_seconds.max(1)));
        let mut cache = FeedCache::default();

        loop {
            interval.tick().await;

            let update = collect_feeds(&cfg, &client).await;
            let snapshot = apply_feed_cache(update, &mut cache, cfg.cache_seconds, Utc::now());
            debug!(prices = snapshot.prices.len(), "feed round complete");

            if tx.send(snapshot).is_err() {
                info!("dashboard gone, stopping feed task");
                break;
            }
        }
    });

    FeedBoard {
        rx: Some(rx),
        current: FeedSnapshot::default(),
    }
}

pub async fn collect_feeds(cfg: &Config, client: &reqwest::Client) -> FeedUpdate {
    let timeout = cfg.feed_timeout_seconds.max(1);
    let ids = cfg
        .prices
        .tickers
        .iter()
        .map(|t| t.id.as_str())
        .collect::<Vec<_>>();

    let (git_branch, weather, prices) = tokio::join!(
        bounded(timeout, collect_git_branch(&cfg.repo_path)),
        bounded(timeout, collect_weather(client, &cfg.weather.location)),
        bounded(timeout, collect_prices(client, &cfg.prices.endpoint, &ids)),
    );

    FeedUpdate {
        git_branch,
        weather,
        prices,
    }
}

async fn bounded<T>(
    secs: u64,
    fut: impl Future<Output = Result<T, FeedError>>,
) -> Result<T, FeedError> {
    tokio::time::timeout(Duration::from_secs(secs), fut)
        .await
        .unwrap_or_else(|_| Err(FeedError::Timeout(secs)))
}

async fn collect_git_branch(repo: &Path) -> Result<String, FeedError> {
    let text = run_cmd(
        "git",
        vec![
            "-C".to_string(),
            repo.display().to_string(),
            "status".to_string(),
            "--porcelain".to_string(),
            "--branch".to_string(),
        ],
    )
    .await?;

    text.lines()
        .next()
        .and_then(parse_branch_header)
        .ok_or_else(|| FeedError::Payload("missing branch header".to_string()))
}

/// Branch name from the `## ...` header of `git status --porcelain --branch`.
fn parse_branch_header(line: &str) -> Option<String> {
    let info = line.strip_prefix("## ")?;
    if info.starts_with("HEAD (no branch)") {
        return Some("HEAD (detached)".to_string());
    }
    let info = info
        .strip_prefix("No commits yet on ")
        .or_else(|| info.strip_prefix("Initial commit on "))
        .unwrap_or(info);
    let branch = info.split("...").next()?.split_whitespace().next()?;
    Some(branch.to_string())
}

async fn collect_weather(client: &reqwest::Client, location: &str) -> Result<String, FeedError> {
    let url = format!("https://wttr.in/{}?format=%C+%t", location.trim());
    let response = client.get(url).send().await?.error_for_status()?;
    let text = response.text().await?;
    let text = text.trim();
    if text.is_empty() || text.contains('<') {
        return Err(FeedError::Payload("weather response was not plain text".to_string()));
    }
    Ok(text.to_string())
}

async fn collect_prices(
    client: &reqwest::Client,
    endpoint: &str,
    ids: &[&str],
) -> Result<PriceMap, FeedError> {
    if ids.is_empty() {
        return Ok(PriceMap::new());
    }

    let quotes = client
        .get(endpoint)
        .query(&[("ids", ids.join(",")), ("vs_currencies", "usd".to_string())])
        .send()
        .await?
        .error_for_status()?
        .json::<SimplePrice>()
        .await?;

    Ok(usd_prices(quotes))
}

/// `{ "bitcoin": { "usd": 67432.5 }, ... }`
type SimplePrice = HashMap<String, HashMap<String, f64>>;

fn usd_prices(quotes: SimplePrice) -> PriceMap {
    quotes
        .into_iter()
        .filter_map(|(id, by_currency)| {
            let usd = *by_currency.get("usd")?;
            (usd.is_finite() && usd >= 0.0).then_some((id, usd))
        })
        .collect()
}

async fn run_cmd(cmd: &str, args: Vec<String>) -> Result<String, FeedError> {
    let output = Command::new(cmd)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| FeedError::Command(format!("{cmd}: {e}")))?;

    if !output.status.success() {
        let err = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(FeedError::Command(if err.is_empty() {
            format!("{cmd} failed with {}", output.status)
        } else {
            err
        }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Frame-loop side of the feed channel. Holds the snapshot the current frame
/// reads and only swaps it in [`FeedBoard::sync`].
#[derive(Debug)]
pub struct FeedBoard {
    rx: Option<watch::Receiver<FeedSnapshot>>,
    current: FeedSnapshot,
}

impl FeedBoard {
    /// A board with fixed content and no feed task behind it.
    pub fn detached(snapshot: FeedSnapshot) -> Self {
        Self {
            rx: None,
            current: snapshot,
        }
    }

    /// Adopt the newest published round, if any. Never blocks.
    pub fn sync(&mut self) {
        let Some(rx) = self.rx.as_mut() else {
            return;
        };
        match rx.has_changed() {
            Ok(true) => self.current = rx.borrow_and_update().clone(),
            Ok(false) => {}
            Err(_) => {
                debug!("feed task ended, keeping last snapshot");
                self.rx = None;
            }
        }
    }
}

impl EnvironmentProvider for FeedBoard {
    fn git_branch(&self) -> String {
        self.current.git_branch.clone()
    }

    fn weather(&self) -> String {
        self.current.weather.clone()
    }
}

impl PriceProvider for FeedBoard {
    fn prices(&self) -> PriceMap {
        self.current.prices.clone()
    }
}
