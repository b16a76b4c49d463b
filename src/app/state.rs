use std::time::{Duration, Instant};

use chrono::NaiveTime;
use tracing::debug;

use crate::collectors::{
    DashboardData, EnvironmentProvider, MetricsProvider, PriceProvider, TopConsumersCache,
    collect_frame,
};
use crate::config::{Config, TickerConfig};

use super::types::AlertThresholds;

/// Per-session frame state, owned by the frame loop and updated once per tick.
#[derive(Debug)]
pub struct App {
    pub data: DashboardData,
    pub width: u16,
    pub height: u16,
    pub alerts: AlertThresholds,
    top_consumers: TopConsumersCache,
    top_n: usize,
    tickers: Vec<TickerConfig>,
}

impl App {
    pub fn new(cfg: &Config) -> Self {
        Self {
            data: DashboardData::default(),
            width: 0,
            height: 0,
            alerts: AlertThresholds::from(&cfg.alerts),
            top_consumers: TopConsumersCache::new(Duration::from_millis(cfg.process_ttl_millis)),
            top_n: cfg.top_processes,
            tickers: cfg.prices.tickers.clone(),
        }
    }

    /// Gather this tick's data from the providers.
    pub fn refresh(
        &mut self,
        metrics: &mut dyn MetricsProvider,
        environment: &dyn EnvironmentProvider,
        prices: &dyn PriceProvider,
        clock: NaiveTime,
    ) {
        self.refresh_at(metrics, environment, prices, clock, Instant::now());
    }

    pub fn refresh_at(
        &mut self,
        metrics: &mut dyn MetricsProvider,
        environment: &dyn EnvironmentProvider,
        prices: &dyn PriceProvider,
        clock: NaiveTime,
        now: Instant,
    ) {
        let top = self.top_consumers.get_at(metrics, self.top_n, now).to_vec();
        self.data = collect_frame(metrics, environment, prices, &top, &self.tickers, clock);
    }

    /// Record the size the last frame was drawn at.
    pub fn observe_size(&mut self, width: u16, height: u16) {
        if (width, height) != (self.width, self.height) {
            debug!(width, height, "terminal resized");
            self.width = width;
            self.height = height;
        }
    }
}
