use crate::config::AlertsConfig;

/// Hazard thresholds; a reading strictly above its threshold is drawn in the
/// alert color. Ratios are stored as fractions of 1.
#[derive(Debug, Clone, Copy)]
pub struct AlertThresholds {
    pub temperature_c: f64,
    pub cpu_ratio: f64,
    pub memory_ratio: f64,
    pub storage_ratio: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self::from(&AlertsConfig::default())
    }
}

impl From<&AlertsConfig> for AlertThresholds {
    fn from(cfg: &AlertsConfig) -> Self {
        Self {
            temperature_c: cfg.temperature_crit_c,
            cpu_ratio: cfg.cpu_crit_pct / 100.0,
            memory_ratio: cfg.memory_crit_pct / 100.0,
            storage_ratio: cfg.storage_crit_pct / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gauge {
    Cpu,
    Memory,
    Storage,
}

impl AlertThresholds {
    pub fn temperature_exceeded(&self, celsius: f64) -> bool {
        celsius > self.temperature_c
    }

    pub fn gauge_exceeded(&self, gauge: Gauge, ratio: f64) -> bool {
        let limit = match gauge {
            Gauge::Cpu => self.cpu_ratio,
            Gauge::Memory => self.memory_ratio,
            Gauge::Storage => self.storage_ratio,
        };
        ratio > limit
    }
}
