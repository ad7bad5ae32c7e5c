//! Server-Sent Events for the chat widget

use crate::runtime::{Snapshot, WidgetEvent};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Convert a session subscription into an SSE stream
pub fn sse_stream(
    init: Snapshot,
    broadcast_rx: broadcast::Receiver<WidgetEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let session = init.id.clone();
    let init = futures::stream::once(async move { Ok(init_event(&init)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(move |result| match result {
        Ok(event) => Some(Ok(widget_event_to_axum(&event))),
        Err(e) => {
            // Client reloads the snapshot on reconnect
            tracing::warn!(session = %session, error = %e, "SSE subscriber lagged");
            None
        }
    });

    Sse::new(init.chain(broadcasts)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn init_event(snapshot: &Snapshot) -> Event {
    let data = json!({
        "type": "init",
        "id": snapshot.id,
        "transcript": snapshot.transcript,
        "pending": snapshot.pending,
    });
    Event::default().event("init").data(data.to_string())
}

fn widget_event_to_axum(event: &WidgetEvent) -> Event {
    let name = match event {
        WidgetEvent::Turn { .. } => "turn",
        WidgetEvent::Pending { .. } => "pending",
        WidgetEvent::InputCleared => "input_cleared",
    };
    let data = serde_json::to_string(event).unwrap_or_else(|_| json!({ "type": name }).to_string());
    Event::default().event(name).data(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{Sender, Transcript};

    #[test]
    fn test_widget_event_payloads() {
        let transcript = Transcript::seeded("hi");
        let turn = transcript.next_turn(Sender::User, "Привет");

        let json = serde_json::to_value(WidgetEvent::Turn { turn }).unwrap();
        assert_eq!(json["type"], "turn");
        assert_eq!(json["turn"]["sender"], "user");
        assert_eq!(json["turn"]["text"], "Привет");

        let json = serde_json::to_value(WidgetEvent::Pending { pending: true }).unwrap();
        assert_eq!(json, json!({ "type": "pending", "pending": true }));

        let json = serde_json::to_value(WidgetEvent::InputCleared).unwrap();
        assert_eq!(json, json!({ "type": "input_cleared" }));
    }
}
