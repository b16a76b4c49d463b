mod cache;
mod feeds;
mod gather;
mod provider;
mod sysfs;
mod system;
#[cfg(test)]
pub mod testing;
mod types;

pub use cache::TopConsumersCache;
pub use feeds::{FeedBoard, spawn_feeds};
pub use gather::collect_frame;
pub use provider::{EnvironmentProvider, MetricsProvider, PriceProvider};
pub use system::SysinfoMetrics;
pub use types::*;
