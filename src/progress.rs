//! Advisory progress events emitted while a document is generated.
//!
//! Sinks only observe; nothing they do can change the produced document.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressEvent {
    /// 0..=100
    pub percent: u8,
    pub message: String,
}

pub trait ProgressSink {
    fn report(&mut self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(ProgressEvent),
{
    fn report(&mut self, event: ProgressEvent) {
        self(event)
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _event: ProgressEvent) {}
}

/// Forwards events into a channel so another thread can follow along.
/// A dropped receiver is ignored.
#[derive(Clone, Debug)]
pub struct ChannelProgress(pub Sender<ProgressEvent>);

impl ProgressSink for ChannelProgress {
    fn report(&mut self, event: ProgressEvent) {
        let _ = self.0.send(event);
    }
}

/// Cooperative cancellation flag, checked between sections.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Observers attached to one generation call.
#[derive(Default)]
pub struct GenerateOptions<'a> {
    pub progress: Option<&'a mut dyn ProgressSink>,
    pub cancel: Option<CancelToken>,
}

impl<'a> GenerateOptions<'a> {
    pub fn with_progress(progress: &'a mut dyn ProgressSink) -> Self {
        Self {
            progress: Some(progress),
            cancel: None,
        }
    }

    pub fn cancel_with(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn emit(&mut self, percent: u8, message: impl Into<String>) {
        let event = ProgressEvent {
            percent: percent.min(100),
            message: message.into(),
        };
        log::debug!("Progress {}%: {}", event.percent, event.message);
        if let Some(sink) = self.progress.as_deref_mut() {
            sink.report(event);
        }
    }

    pub(crate) fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}
