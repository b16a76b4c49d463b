use chrono::NaiveTime;

use crate::config::TickerConfig;

use super::provider::{EnvironmentProvider, MetricsProvider, PriceProvider};
use super::types::{DashboardData, EnvironmentInfo, PriceQuote, ProcessMetric, Vitals};

/// Read every provider once and freeze the results for one frame.
///
/// `top_consumers` comes from the throttled cache, not from `metrics`, so the
/// expensive ranking is not queried here.
pub fn collect_frame(
    metrics: &mut dyn MetricsProvider,
    environment: &dyn EnvironmentProvider,
    prices: &dyn PriceProvider,
    top_consumers: &[ProcessMetric],
    tickers: &[TickerConfig],
    clock: NaiveTime,
) -> DashboardData {
    let vitals = Vitals {
        cpu_load: metrics.cpu_load().clamp(0.0, 1.0),
        memory_usage: metrics.memory_usage().clamp(0.0, 1.0),
        storage_usage: metrics.storage_usage().clamp(0.0, 1.0),
        cpu_temperature: metrics.cpu_temperature(),
        battery: metrics.battery_info(),
        process_count: metrics.process_count(),
        thread_count: metrics.thread_count(),
    };

    let environment = EnvironmentInfo {
        os_name: metrics.os_name(),
        uptime: metrics.uptime(),
        git_branch: environment.git_branch(),
        weather: environment.weather(),
        fan_speed: metrics.fan_speed(),
        net_down_bps: metrics.network_download_speed(),
        net_up_bps: metrics.network_upload_speed(),
    };

    let price_map = prices.prices();
    let tickers = tickers
        .iter()
        .map(|t| PriceQuote {
            symbol: t.symbol.clone(),
            price: price_map.get(&t.id).copied(),
        })
        .collect();

    DashboardData {
        vitals,
        environment,
        top_consumers: top_consumers.to_vec(),
        tickers,
        clock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::testing::{FakeEnvironment, FakeMetrics, FakePrices};
    use crate::collectors::types::PriceMap;
    use crate::config::PriceConfig;

    #[test]
    fn tickers_follow_tracked_order_with_gaps() {
        let mut metrics = FakeMetrics::default();
        let prices = FakePrices(PriceMap::from([
            ("dogecoin".to_string(), 0.12),
            ("bitcoin".to_string(), 67_000.0),
            ("monero".to_string(), 150.0),
        ]));

        let data = collect_frame(
            &mut metrics,
            &FakeEnvironment::default(),
            &prices,
            &[],
            &PriceConfig::default().tickers,
            NaiveTime::MIN,
        );

        let rows = data
            .tickers
            .iter()
            .map(|q| (q.symbol.as_str(), q.price))
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            vec![
                ("BTC", Some(67_000.0)),
                ("ETH", None),
                ("SOL", None),
                ("DOGE", Some(0.12)),
            ]
        );
    }

    #[test]
    fn ratios_are_clamped_and_ranking_is_not_requeried() {
        let mut metrics = FakeMetrics {
            cpu: 1.7,
            memory: -0.2,
            ..FakeMetrics::default()
        };
        let cached = vec![ProcessMetric {
            name: "cargo".into(),
            cpu_usage: 42.0,
        }];

        let data = collect_frame(
            &mut metrics,
            &FakeEnvironment::default(),
            &FakePrices::default(),
            &cached,
            &[],
            NaiveTime::MIN,
        );

        assert_eq!(data.vitals.cpu_load, 1.0);
        assert_eq!(data.vitals.memory_usage, 0.0);
        assert_eq!(data.top_consumers, cached);
        assert_eq!(metrics.top_calls, 0);
        assert_eq!(data.environment.git_branch, "main");
        assert_eq!(data.environment.net_down_bps, 1_536);
    }
}
