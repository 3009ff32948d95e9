//! Progress reporting
//!
//! The pipeline reports a fixed sequence of checkpoints: loading at 5%,
//! detection at 20%, one event per region spread over 20..100, and a
//! final "Done" at 100%.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Pipeline stage a progress event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressScope {
    Load,
    Scan,
    Save,
    Done,
}

/// One progress checkpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub message: String,
    /// Completion in percent, 0..=100
    pub percent: u8,
    pub scope: ProgressScope,
}

impl ProgressEvent {
    /// Create an event; `percent` is clamped to 100
    pub fn new(message: impl Into<String>, percent: u8, scope: ProgressScope) -> Self {
        Self {
            message: message.into(),
            percent: percent.min(100),
            scope,
        }
    }
}

/// Receiver of progress events.
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn report(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Sink that records every event it receives.
#[derive(Debug, Default)]
pub struct ProgressLog {
    events: Mutex<Vec<ProgressEvent>>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.lock().clone()
    }

    /// Most recent event
    pub fn last(&self) -> Option<ProgressEvent> {
        self.lock().last().cloned()
    }

    /// Number of events received
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ProgressEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProgressSink for ProgressLog {
    fn report(&self, event: &ProgressEvent) {
        self.lock().push(event.clone());
    }
}

/// Percent reached after saving region `done` of `total`.
pub(crate) fn save_percent(done: usize, total: usize) -> u8 {
    const START: usize = 20;
    const SPAN: usize = 80;
    if total == 0 {
        return 100;
    }
    (START + SPAN * done.min(total) / total) as u8
}

pub(crate) fn emit(sink: Option<&dyn ProgressSink>, event: ProgressEvent) {
    if let Some(sink) = sink {
        sink.report(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_serialization() {
        let event = ProgressEvent::new("Loading image", 5, ProgressScope::Load);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"message":"Loading image","percent":5,"scope":"load"}"#
        );
        let scopes: Vec<ProgressScope> =
            serde_json::from_str(r#"["load","scan","save","done"]"#).unwrap();
        assert_eq!(
            scopes,
            vec![
                ProgressScope::Load,
                ProgressScope::Scan,
                ProgressScope::Save,
                ProgressScope::Done
            ]
        );
    }

    #[test]
    fn test_percent_clamped() {
        assert_eq!(ProgressEvent::new("x", 250, ProgressScope::Done).percent, 100);
    }

    #[test]
    fn test_save_percent() {
        assert_eq!(save_percent(0, 4), 20);
        assert_eq!(save_percent(1, 4), 40);
        assert_eq!(save_percent(4, 4), 100);
        assert_eq!(save_percent(1, 3), 46);
        assert_eq!(save_percent(0, 0), 100);
    }

    #[test]
    fn test_closure_sink() {
        let count = std::sync::atomic::AtomicUsize::new(0);
        let sink = |_: &ProgressEvent| {
            count.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        };
        emit(Some(&sink), ProgressEvent::new("a", 1, ProgressScope::Load));
        emit(None, ProgressEvent::new("b", 2, ProgressScope::Load));
        assert_eq!(count.load(std::sync::atomic::Ordering::Relaxed), 1);
    }

    #[test]
    fn test_progress_log() {
        let log = ProgressLog::new();
        assert!(log.is_empty());
        log.report(&ProgressEvent::new("a", 5, ProgressScope::Load));
        log.report(&ProgressEvent::new("b", 100, ProgressScope::Done));
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(|e| e.scope), Some(ProgressScope::Done));
    }
}
