#![forbid(unsafe_code)]

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use scpost_kernel_contracts::post::PostSavedEvent;

/// Observer of admitted posts (indexers, UIs). Called once per post, in id order,
/// after the post is committed.
pub trait PostSavedSink: Send + Sync {
    fn post_saved(&self, event: &PostSavedEvent);
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PostSavedEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PostSavedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PostSavedSink for RecordingSink {
    fn post_saved(&self, event: &PostSavedEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Writes one JSON object per event, newline-terminated.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> PostSavedSink for JsonLinesSink<W> {
    fn post_saved(&self, event: &PostSavedEvent) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let written = serde_json::to_writer(&mut *out, event)
            .map_err(std::io::Error::from)
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| out.flush());
        // The post is already committed; a failing observer must not undo it.
        if let Err(e) = written {
            tracing::warn!(post_id = event.id.0, error = %e, "post_saved notification write failed");
        }
    }
}
