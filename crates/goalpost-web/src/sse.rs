//! Server-Sent Events (SSE) streaming for real-time UI updates.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_core::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::SharedState;

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(20);

/// SSE endpoint — clients subscribe here for live mutation events.
///
/// Each message carries the event kind as the SSE event name and the full
/// payload as JSON data. Lagged receivers drop events silently; the pages
/// re-read state on navigation anyway.
pub async fn sse_handler(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|received| {
        let app_event = received.ok()?;
        let payload = serde_json::to_string(&app_event).ok()?;
        Some(Ok(Event::default().event(app_event.kind()).data(payload)))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE_INTERVAL).text("keep-alive"))
}
