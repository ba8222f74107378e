//! Event queue
//!
//! A single consumer drains [`AppEvent`]s one at a time, so handlers never
//! interleave. Updates go out on an unbounded channel.

use super::context::Dashboard;
use super::messages::{AppEvent, UiUpdate};
use tokio::sync::mpsc;

/// Sending half of the event queue
pub type EventSender = mpsc::UnboundedSender<AppEvent>;
/// Receiving half of the event queue
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

/// Create an event queue
pub fn event_queue() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Drain events until `Shutdown` or until every sender is dropped
///
/// Startup updates are emitted first. Returns the dashboard so the caller
/// can inspect or reuse it.
pub async fn run(
    mut dashboard: Dashboard,
    mut events: EventReceiver,
    updates: mpsc::UnboundedSender<UiUpdate>,
) -> Dashboard {
    tracing::info!("Event loop started");

    for update in dashboard.startup_updates() {
        if updates.send(update).is_err() {
            tracing::warn!("Update receiver dropped before startup");
            return dashboard;
        }
    }

    while let Some(event) = events.recv().await {
        if event == AppEvent::Shutdown {
            tracing::info!("Shutdown requested");
            break;
        }

        for update in dashboard.handle(event).await {
            if let UiUpdate::Error { message } = &update {
                tracing::warn!(message = %message, "Surfacing error to user");
            }
            tracing::trace!(kind = update.kind(), "Emitting update");

            if updates.send(update).is_err() {
                tracing::warn!("Update receiver dropped, stopping event loop");
                return dashboard;
            }
        }
    }

    tracing::info!("Event loop stopped");
    dashboard
}
