//! Timer-driven product event stream
//!
//! Feeds the server-push endpoint: one event per period, numbered from 0.
//! Nothing here touches the store.

use std::time::Duration;

use futures_util::Stream;
use tokio::time::{interval_at, Instant};

use crate::models::ProductEvent;

/// Cadence of the event stream exposed over HTTP
pub const DEFAULT_EVENT_PERIOD: Duration = Duration::from_secs(1);

/// Unbounded stream of product events, one per `period`
///
/// Every call returns an independent stream with its own counter starting
/// at 0, so each subscriber sees its own sequence. The first event arrives
/// one full period after subscription. Dropping the stream stops emission.
pub fn product_events(period: Duration) -> impl Stream<Item = ProductEvent> {
    async_stream::stream! {
        let mut ticker = interval_at(Instant::now() + period, period);
        let mut event_id: u64 = 0;

        loop {
            ticker.tick().await;
            yield ProductEvent::new(event_id);
            event_id += 1;
        }
    }
}
