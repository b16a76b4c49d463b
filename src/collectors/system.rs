use std::time::{Duration, Instant};

use sysinfo::{Disks, MINIMUM_CPU_UPDATE_INTERVAL, Networks, ProcessesToUpdate, System};

use crate::fmt::format_duration_short;

use super::provider::MetricsProvider;
use super::sysfs::KernelFiles;
use super::types::ProcessMetric;

const DISK_REFRESH: Duration = Duration::from_secs(5);
const PROCESS_COUNT_REFRESH: Duration = Duration::from_secs(2);

/// Live metrics backed by `sysinfo` plus a few kernel files.
pub struct SysinfoMetrics {
    sys: System,
    kernel: KernelFiles,
    cpu_sampled_at: Instant,
    storage: f64,
    disks_sampled_at: Option<Instant>,
    processes_sampled_at: Option<Instant>,
    net: NetworkCounter,
}

impl SysinfoMetrics {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let mut metrics = Self {
            sys,
            kernel: KernelFiles::default(),
            cpu_sampled_at: Instant::now(),
            storage: 0.0,
            disks_sampled_at: None,
            processes_sampled_at: None,
            net: NetworkCounter::default(),
        };
        metrics.net.sample(interface_totals(), Instant::now());
        // baseline for per-process cpu deltas
        metrics.refresh_processes();
        metrics
    }

    fn refresh_processes(&mut self) {
        self.sys.refresh_processes(ProcessesToUpdate::All, true);
        self.processes_sampled_at = Some(Instant::now());
    }

    /// Every entry sysinfo lists, flagged when it is a thread (Linux lists tasks too).
    fn process_entries(&self) -> impl Iterator<Item = ProcessEntry> + '_ {
        self.sys.processes().values().map(|p| ProcessEntry {
            name: p.name().to_string_lossy().to_string(),
            cpu_usage: p.cpu_usage(),
            is_thread: p.thread_kind().is_some(),
        })
    }
}

impl MetricsProvider for SysinfoMetrics {
    fn cpu_load(&mut self) -> f64 {
        if self.cpu_sampled_at.elapsed() >= MINIMUM_CPU_UPDATE_INTERVAL {
            self.sys.refresh_cpu_usage();
            self.cpu_sampled_at = Instant::now();
        }
        (self.sys.global_cpu_usage() as f64 / 100.0).clamp(0.0, 1.0)
    }

    fn memory_usage(&mut self) -> f64 {
        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        if total == 0 {
            return 0.0;
        }
        (self.sys.used_memory() as f64 / total as f64).clamp(0.0, 1.0)
    }

    fn storage_usage(&mut self) -> f64 {
        let due = self
            .disks_sampled_at
            .is_none_or(|at| at.elapsed() >= DISK_REFRESH);
        if due {
            let mut total = 0u64;
            let mut used = 0u64;
            for disk in Disks::new_with_refreshed_list().iter() {
                total += disk.total_space();
                used += disk.total_space().saturating_sub(disk.available_space());
            }
            self.storage = if total > 0 {
                (used as f64 / total as f64).clamp(0.0, 1.0)
            } else {
                0.0
            };
            self.disks_sampled_at = Some(Instant::now());
        }
        self.storage
    }

    fn cpu_temperature(&mut self) -> Option<f64> {
        self.kernel.cpu_temperature()
    }

    fn battery_info(&mut self) -> String {
        self.kernel.battery_info()
    }

    fn process_count(&mut self) -> usize {
        let due = self
            .processes_sampled_at
            .is_none_or(|at| at.elapsed() >= PROCESS_COUNT_REFRESH);
        if due {
            self.refresh_processes();
        }
        count_processes(self.process_entries())
    }

    fn thread_count(&mut self) -> usize {
        self.kernel.thread_count().unwrap_or(0)
    }

    fn os_name(&self) -> String {
        System::long_os_version()
            .or_else(System::name)
            .unwrap_or_else(|| std::env::consts::OS.to_string())
    }

    fn uptime(&self) -> String {
        format_duration_short(System::uptime())
    }

    fn fan_speed(&mut self) -> String {
        self.kernel.fan_speed()
    }

    fn refresh_network_speeds(&mut self) {
        self.net.sample(interface_totals(), Instant::now());
    }

    fn network_download_speed(&self) -> u64 {
        self.net.down_bps
    }

    fn network_upload_speed(&self) -> u64 {
        self.net.up_bps
    }

    fn top_consumers(&mut self, n: usize) -> Vec<ProcessMetric> {
        let wait = settle_delay(self.processes_sampled_at.map(|at| at.elapsed()));
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        self.refresh_processes();
        rank_processes(self.process_entries(), self.sys.cpus().len(), n)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ProcessEntry {
    name: String,
    cpu_usage: f32,
    is_thread: bool,
}

fn count_processes(entries: impl Iterator<Item = ProcessEntry>) -> usize {
    entries.filter(|e| !e.is_thread).count()
}

/// Top `n` processes by cpu, normalised to 0-100 over `cores`.
fn rank_processes(
    entries: impl Iterator<Item = ProcessEntry>,
    cores: usize,
    n: usize,
) -> Vec<ProcessMetric> {
    let cores = cores.max(1) as f64;
    let mut ranked = entries
        .filter(|e| !e.is_thread)
        .map(|e| ProcessMetric {
            name: e.name,
            cpu_usage: (e.cpu_usage as f64 / cores).clamp(0.0, 100.0),
        })
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| {
        b.cpu_usage
            .partial_cmp(&a.cpu_usage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

/// How long to wait before a process refresh yields meaningful cpu usage.
/// sysinfo needs two samples at least `MINIMUM_CPU_UPDATE_INTERVAL` apart.
fn settle_delay(since_last_sample: Option<Duration>) -> Duration {
    match since_last_sample {
        Some(elapsed) => MINIMUM_CPU_UPDATE_INTERVAL.saturating_sub(elapsed),
        None => MINIMUM_CPU_UPDATE_INTERVAL,
    }
}

/// Summed (received, transmitted) byte counters over non-loopback interfaces.
fn interface_totals() -> (u64, u64) {
    Networks::new_with_refreshed_list()
        .iter()
        .filter(|(name, _)| name.as_str() != "lo")
        .fold((0, 0), |(rx, tx), (_, data)| {
            (rx + data.total_received(), tx + data.total_transmitted())
        })
}

/// Turns cumulative byte counters into per-second rates between samples.
#[derive(Debug, Default)]
struct NetworkCounter {
    last: Option<((u64, u64), Instant)>,
    down_bps: u64,
    up_bps: u64,
}

impl NetworkCounter {
    fn sample(&mut self, totals: (u64, u64), now: Instant) {
        if let Some(((prev_rx, prev_tx), at)) = self.last {
            let elapsed = now.saturating_duration_since(at);
            self.down_bps = per_second(totals.0.saturating_sub(prev_rx), elapsed);
            self.up_bps = per_second(totals.1.saturating_sub(prev_tx), elapsed);
        }
        self.last = Some((totals, now));
    }
}

fn per_second(bytes: u64, elapsed: Duration) -> u64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0;
    }
    (bytes as f64 / secs) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_has_no_rate() {
        let mut counter = NetworkCounter::default();
        counter.sample((10_000, 5_000), Instant::now());
        assert_eq!(counter.down_bps, 0);
        assert_eq!(counter.up_bps, 0);
    }

    #[test]
    fn rate_is_delta_over_elapsed() {
        let mut counter = NetworkCounter::default();
        let t0 = Instant::now();
        counter.sample((10_000, 5_000), t0);
        counter.sample((10_000 + 2_048, 5_000 + 512), t0 + Duration::from_millis(500));
        assert_eq!(counter.down_bps, 4_096);
        assert_eq!(counter.up_bps, 1_024);
    }

    #[test]
    fn counter_reset_does_not_underflow() {
        let mut counter = NetworkCounter::default();
        let t0 = Instant::now();
        counter.sample((10_000, 5_000), t0);
        counter.sample((100, 50), t0 + Duration::from_secs(1));
        assert_eq!(counter.down_bps, 0);
        assert_eq!(counter.up_bps, 0);
    }

    #[test]
    fn zero_elapsed_yields_zero() {
        assert_eq!(per_second(1_000, Duration::ZERO), 0);
    }

    fn entry(name: &str, cpu_usage: f32, is_thread: bool) -> ProcessEntry {
        ProcessEntry {
            name: name.to_string(),
            cpu_usage,
            is_thread,
        }
    }

    fn sample_entries() -> Vec<ProcessEntry> {
        vec![
            entry("termdash", 40.0, false),
            entry("tokio-rt-worker", 160.0, true),
            entry("tokio-rt-worker", 150.0, true),
            entry("rustc", 300.0, false),
            entry("bash", 0.0, false),
        ]
    }

    #[test]
    fn threads_are_not_counted_as_processes() {
        assert_eq!(count_processes(sample_entries().into_iter()), 3);
    }

    #[test]
    fn ranking_skips_threads_and_sorts_descending() {
        let ranked = rank_processes(sample_entries().into_iter(), 4, 3);
        let names = ranked.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["rustc", "termdash", "bash"]);
        assert_eq!(ranked[0].cpu_usage, 75.0);
        assert_eq!(ranked[1].cpu_usage, 10.0);
    }

    #[test]
    fn ranking_clamps_and_survives_zero_cores() {
        let ranked = rank_processes(vec![entry("spin", 250.0, false)].into_iter(), 0, 5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].cpu_usage, 100.0);
    }

    #[test]
    fn settle_delay_waits_out_the_minimum_interval() {
        assert_eq!(settle_delay(None), MINIMUM_CPU_UPDATE_INTERVAL);
        assert_eq!(settle_delay(Some(Duration::ZERO)), MINIMUM_CPU_UPDATE_INTERVAL);
        assert_eq!(settle_delay(Some(MINIMUM_CPU_UPDATE_INTERVAL)), Duration::ZERO);
        assert_eq!(settle_delay(Some(Duration::from_secs(5))), Duration::ZERO);

        let half = MINIMUM_CPU_UPDATE_INTERVAL / 2;
        assert_eq!(settle_delay(Some(half)), MINIMUM_CPU_UPDATE_INTERVAL - half);
    }

    #[test]
    fn fresh_metrics_have_a_process_baseline() {
        let metrics = SysinfoMetrics::new();
        assert!(metrics.processes_sampled_at.is_some());
    }
}
