// Server-sent event stream of dashboard view updates
use crate::domain::view_state::ViewState;
use crate::infrastructure::view_mapper::dashboard_to_view;
use axum::response::sse::{Event, KeepAlive, Sse};
use chrono_tz::Tz;
use futures::stream::Stream;
use tokio::sync::watch;

/// One `dashboard` event for the current state, then one per change until the
/// controller goes away.
pub fn dashboard_events(
    mut rx: watch::Receiver<ViewState>,
    title: String,
    tz: Tz,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    async_stream::stream! {
        loop {
            let view = {
                let state = rx.borrow_and_update();
                dashboard_to_view(&state, &title, tz)
            };
            yield Event::default().event("dashboard").json_data(view);

            if rx.changed().await.is_err() {
                break;
            }
        }
    }
}

pub fn sse_from_receiver(
    rx: watch::Receiver<ViewState>,
    title: String,
    tz: Tz,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    Sse::new(dashboard_events(rx, title, tz)).keep_alive(KeepAlive::default())
}
