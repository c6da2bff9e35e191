//! Gold price feed module
//!
//! Polls an upstream spot price on a fixed interval, falls back to a bounded
//! random walk when the upstream fails, and fans each snapshot out to
//! subscribers.

mod registry;
mod scheduler;
mod simulator;
mod source;
mod state;
mod types;

pub use registry::{Subscription, SubscriptionId, SubscriptionRegistry};
pub use scheduler::{SchedulerState, TickScheduler};
pub use simulator::PriceSimulator;
pub use source::{HttpSpotSource, PriceSource, UnavailableSource};
pub use state::FeedState;
pub(crate) use types::percent_of;
pub use types::{FeedError, FetchError, PriceSnapshot, StateError, TickError, TickOrigin};

use crate::config::Config;
use std::sync::Arc;

/// Build the feed from configuration
///
/// With `offline` the upstream is never contacted and every tick is simulated.
pub fn build_feed(config: &Config, offline: bool) -> Result<TickScheduler, FeedError> {
    let source: Arc<dyn PriceSource> = if offline {
        Arc::new(UnavailableSource)
    } else {
        Arc::new(HttpSpotSource::new(&config.source)?)
    };

    TickScheduler::new(&config.scheduler, &config.simulator, source)
}
