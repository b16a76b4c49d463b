//! Data-source contracts consumed by the frame loop.
//!
//! Anything implementing these can feed the dashboard; the live implementations
//! are [`SysinfoMetrics`](super::SysinfoMetrics) and
//! [`FeedBoard`](super::FeedBoard), tests use scripted fakes.

use super::types::{PriceMap, ProcessMetric};

/// Local machine metrics. Sampling methods take `&mut self` because most of
/// them refresh an underlying sampler before reading.
pub trait MetricsProvider {
    /// Ratio in `[0, 1]`.
    fn cpu_load(&mut self) -> f64;
    /// Ratio in `[0, 1]`.
    fn memory_usage(&mut self) -> f64;
    /// Ratio in `[0, 1]`.
    fn storage_usage(&mut self) -> f64;
    /// Degrees Celsius, `None` when no sensor is readable.
    fn cpu_temperature(&mut self) -> Option<f64>;
    fn battery_info(&mut self) -> String;
    fn process_count(&mut self) -> usize;
    fn thread_count(&mut self) -> usize;
    fn os_name(&self) -> String;
    fn uptime(&self) -> String;
    fn fan_speed(&mut self) -> String;
    /// Recompute throughput over the time since the previous call. Must run
    /// once per tick before the speeds are read.
    fn refresh_network_speeds(&mut self);
    /// Bytes per second.
    fn network_download_speed(&self) -> u64;
    /// Bytes per second.
    fn network_upload_speed(&self) -> u64;
    /// The `n` busiest processes, descending by CPU usage.
    fn top_consumers(&mut self, n: usize) -> Vec<ProcessMetric>;
}

pub trait EnvironmentProvider {
    fn git_branch(&self) -> String;
    fn weather(&self) -> String;
}

pub trait PriceProvider {
    fn prices(&self) -> PriceMap;
}
