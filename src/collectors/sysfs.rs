//! Readings sysinfo doesn't cover, taken straight from `/sys` and `/proc`.
//!
//! Every reader degrades to "unavailable" when files are missing, which is
//! always the case off Linux.

use std::fs;
use std::path::{Path, PathBuf};

use super::types::NOT_AVAILABLE;

const CPU_ZONE_HINTS: [&str; 5] = ["x86_pkg_temp", "cpu", "soc", "k10temp", "coretemp"];

#[derive(Debug, Clone)]
pub struct KernelFiles {
    sys: PathBuf,
    proc: PathBuf,
}

impl Default for KernelFiles {
    fn default() -> Self {
        Self::with_roots("/sys", "/proc")
    }
}

impl KernelFiles {
    pub fn with_roots(sys: impl Into<PathBuf>, proc: impl Into<PathBuf>) -> Self {
        Self {
            sys: sys.into(),
            proc: proc.into(),
        }
    }

    /// CPU temperature in °C from the thermal zones, preferring zones whose
    /// type looks like a CPU package.
    pub fn cpu_temperature(&self) -> Option<f64> {
        let mut zones = list_dir(&self.sys.join("class/thermal"))
            .into_iter()
            .filter(|p| file_name_starts_with(p, "thermal_zone"))
            .filter_map(|zone| {
                let kind = read_trimmed(&zone.join("type")).unwrap_or_default();
                let millis = read_trimmed(&zone.join("temp"))?.parse::<i64>().ok()?;
                Some((kind.to_ascii_lowercase(), millis as f64 / 1000.0))
            })
            .collect::<Vec<_>>();
        zones.sort_by(|a, b| a.0.cmp(&b.0));

        zones
            .iter()
            .find(|(kind, _)| CPU_ZONE_HINTS.iter().any(|hint| kind.contains(hint)))
            .or_else(|| zones.first())
            .map(|(_, celsius)| *celsius)
    }

    /// `"87% (Charging)"` for the first battery found, `"N/A"` without one.
    pub fn battery_info(&self) -> String {
        list_dir(&self.sys.join("class/power_supply"))
            .into_iter()
            .filter(|supply| {
                read_trimmed(&supply.join("type")).is_some_and(|kind| kind == "Battery")
            })
            .find_map(|supply| {
                let capacity = read_trimmed(&supply.join("capacity"))?;
                let status = read_trimmed(&supply.join("status"));
                Some(match status {
                    Some(status) if !status.is_empty() => format!("{capacity}% ({status})"),
                    _ => format!("{capacity}%"),
                })
            })
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Fastest fan reported by hwmon, `"N/A"` when none report.
    pub fn fan_speed(&self) -> String {
        let fastest = list_dir(&self.sys.join("class/hwmon"))
            .into_iter()
            .flat_map(|hwmon| list_dir(&hwmon))
            .filter(|p| {
                let name = p.file_name().and_then(|n| n.to_str()).unwrap_or("");
                name.starts_with("fan") && name.ends_with("_input")
            })
            .filter_map(|p| read_trimmed(&p)?.parse::<u64>().ok())
            .max();

        match fastest {
            Some(rpm) => format!("{rpm} RPM"),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Total scheduling entities (threads) from `/proc/loadavg`.
    pub fn thread_count(&self) -> Option<usize> {
        read_trimmed(&self.proc.join("loadavg")).and_then(|raw| parse_loadavg_threads(&raw))
    }
}

/// `"0.15 0.10 0.05 1/150 1234"` -> `150`.
pub fn parse_loadavg_threads(raw: &str) -> Option<usize> {
    raw.split_whitespace()
        .nth(3)?
        .split_once('/')?
        .1
        .parse()
        .ok()
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

fn list_dir(path: &Path) -> Vec<PathBuf> {
    let mut entries = fs::read_dir(path)
        .map(|rd| rd.filter_map(|e| e.ok().map(|e| e.path())).collect::<Vec<_>>())
        .unwrap_or_default();
    entries.sort();
    entries
}

fn file_name_starts_with(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(prefix))
}
