//! Server-sent event decoding for streamed completions.

use eventsource_stream::Eventsource;
use futures::StreamExt;
use futures::stream::BoxStream;

use crate::error::{Error, Result};
use crate::types::{Completion, CompletionEvent, Envelope};

/// Stream of events from a streamed completion.
pub type CompletionStream = BoxStream<'static, Result<CompletionEvent>>;

/// Turn an SSE response into completion events.
///
/// Every `data:` frame is a `{code, message, data}` envelope. `data: true`
/// ends the stream; a non-zero code is an API error.
pub(crate) fn completion_events(response: reqwest::Response) -> CompletionStream {
    let status = response.status().as_u16();
    let stream = response.bytes_stream().eventsource();

    stream
        .filter_map(move |result| async move {
            match result {
                Ok(event) => {
                    // Skip empty events
                    if event.data.trim().is_empty() {
                        return None;
                    }
                    Some(parse_frame(status, &event.data))
                }
                Err(e) => Some(Err(Error::Stream(e.to_string()))),
            }
        })
        .boxed()
}

pub(crate) fn parse_frame(status: u16, data: &str) -> Result<CompletionEvent> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(data).map_err(|e| {
        tracing::warn!(data = %data, error = %e, "Failed to parse stream event");
        Error::Json(e)
    })?;

    if envelope.code != 0 {
        return Err(Error::Api {
            status,
            code: envelope.code,
            message: envelope.message.unwrap_or_default(),
        });
    }

    match envelope.data {
        Some(serde_json::Value::Bool(true)) => Ok(CompletionEvent::Done),
        Some(value) => Ok(CompletionEvent::Answer(serde_json::from_value::<Completion>(value)?)),
        None => Err(Error::Stream("event without data".to_string())),
    }
}
