mod state;
mod types;

pub use state::App;
pub use types::{AlertThresholds, Gauge};
