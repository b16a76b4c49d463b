//! Scripted providers for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::provider::{EnvironmentProvider, MetricsProvider, PriceProvider};
use super::types::{PriceMap, ProcessMetric};

/// Metrics fake with fixed readings, a queue of rankings handed out one per
/// `top_consumers` call, call counters and an ordered log of network calls.
#[derive(Debug)]
pub struct FakeMetrics {
    pub cpu: f64,
    pub memory: f64,
    pub storage: f64,
    pub temperature: Option<f64>,
    pub battery: String,
    pub processes: usize,
    pub threads: usize,
    pub os: String,
    pub uptime: String,
    pub fan: String,
    pub down: u64,
    pub up: u64,
    pub rankings: VecDeque<Vec<ProcessMetric>>,
    pub top_calls: usize,
    pub last_top_n: Option<usize>,
    pub network_refreshes: usize,
    pub network_calls: RefCell<Vec<&'static str>>,
}

impl Default for FakeMetrics {
    fn default() -> Self {
        Self {
            cpu: 0.25,
            memory: 0.5,
            storage: 0.75,
            temperature: Some(50.0),
            battery: "87% (Charging)".into(),
            processes: 312,
            threads: 1_024,
            os: "Linux 6.8 (Test)".into(),
            uptime: "02h 15m".into(),
            fan: "1200 RPM".into(),
            down: 1_536,
            up: 512,
            rankings: VecDeque::new(),
            top_calls: 0,
            last_top_n: None,
            network_refreshes: 0,
            network_calls: RefCell::new(Vec::new()),
        }
    }
}

impl MetricsProvider for FakeMetrics {
    fn cpu_load(&mut self) -> f64 {
        self.cpu
    }

    fn memory_usage(&mut self) -> f64 {
        self.memory
    }

    fn storage_usage(&mut self) -> f64 {
        self.storage
    }

    fn cpu_temperature(&mut self) -> Option<f64> {
        self.temperature
    }

    fn battery_info(&mut self) -> String {
        self.battery.clone()
    }

    fn process_count(&mut self) -> usize {
        self.processes
    }

    fn thread_count(&mut self) -> usize {
        self.threads
    }

    fn os_name(&self) -> String {
        self.os.clone()
    }

    fn uptime(&self) -> String {
        self.uptime.clone()
    }

    fn fan_speed(&mut self) -> String {
        self.fan.clone()
    }

    fn refresh_network_speeds(&mut self) {
        self.network_refreshes += 1;
        self.network_calls.get_mut().push("refresh");
    }

    fn network_download_speed(&self) -> u64 {
        self.network_calls.borrow_mut().push("down");
        self.down
    }

    fn network_upload_speed(&self) -> u64 {
        self.network_calls.borrow_mut().push("up");
        self.up
    }

    fn top_consumers(&mut self, n: usize) -> Vec<ProcessMetric> {
        self.top_calls += 1;
        self.last_top_n = Some(n);
        self.rankings.pop_front().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct FakeEnvironment {
    pub branch: String,
    pub weather: String,
}

impl Default for FakeEnvironment {
    fn default() -> Self {
        Self {
            branch: "main".into(),
            weather: "Clear +18°C".into(),
        }
    }
}

impl EnvironmentProvider for FakeEnvironment {
    fn git_branch(&self) -> String {
        self.branch.clone()
    }

    fn weather(&self) -> String {
        self.weather.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakePrices(pub PriceMap);

impl PriceProvider for FakePrices {
    fn prices(&self) -> PriceMap {
        self.0.clone()
    }
}
