use std::collections::HashMap;

use chrono::NaiveTime;

/// Everything one frame draws, gathered before drawing starts.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub vitals: Vitals,
    pub environment: EnvironmentInfo,
    pub top_consumers: Vec<ProcessMetric>,
    /// One entry per tracked ticker, in tracked order.
    pub tickers: Vec<PriceQuote>,
    pub clock: NaiveTime,
}

impl Default for DashboardData {
    fn default() -> Self {
        Self {
            vitals: Vitals::default(),
            environment: EnvironmentInfo::default(),
            top_consumers: vec![],
            tickers: vec![],
            clock: NaiveTime::MIN,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Vitals {
    pub cpu_load: f64,
    pub memory_usage: f64,
    pub storage_usage: f64,
    /// Degrees Celsius. `None` or a non-positive reading both mean "no sensor".
    pub cpu_temperature: Option<f64>,
    pub battery: String,
    pub process_count: usize,
    pub thread_count: usize,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            cpu_load: 0.0,
            memory_usage: 0.0,
            storage_usage: 0.0,
            cpu_temperature: None,
            battery: NOT_AVAILABLE.into(),
            process_count: 0,
            thread_count: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnvironmentInfo {
    pub os_name: String,
    pub uptime: String,
    pub git_branch: String,
    pub weather: String,
    pub fan_speed: String,
    pub net_down_bps: u64,
    pub net_up_bps: u64,
}

impl Default for EnvironmentInfo {
    fn default() -> Self {
        Self {
            os_name: NOT_AVAILABLE.into(),
            uptime: NOT_AVAILABLE.into(),
            git_branch: NOT_AVAILABLE.into(),
            weather: NOT_AVAILABLE.into(),
            fan_speed: NOT_AVAILABLE.into(),
            net_down_bps: 0,
            net_up_bps: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessMetric {
    pub name: String,
    /// Share of total CPU capacity, 0-100.
    pub cpu_usage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: Option<f64>,
}

/// Feed id (e.g. `"bitcoin"`) to USD price. Missing keys are normal.
pub type PriceMap = HashMap<String, f64>;

/// Latest values published by the background feed task.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub git_branch: String,
    pub weather: String,
    pub prices: PriceMap,
}

impl Default for FeedSnapshot {
    fn default() -> Self {
        Self {
            git_branch: NOT_AVAILABLE.into(),
            weather: NOT_AVAILABLE.into(),
            prices: PriceMap::new(),
        }
    }
}

pub const NOT_AVAILABLE: &str = "N/A";
