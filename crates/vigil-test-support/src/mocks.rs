//! Mock implementations of core port traits.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use vigil_core::domain::{DisplayUpdate, FrameSample, MonitorEvent, MonitorEventKind};
use vigil_core::ports::{AudioAlert, DisplayRenderer, EventLogger, Notifier, SignalSource};

/// Mock implementation of `SignalSource` for testing.
///
/// Yields scripted samples and errors in order, then reports exhaustion.
pub struct MockSignalSource {
    items: Mutex<VecDeque<anyhow::Result<FrameSample>>>,
}

impl MockSignalSource {
    /// Creates a source yielding the given samples.
    #[must_use]
    pub fn new(samples: Vec<FrameSample>) -> Self {
        Self {
            items: Mutex::new(samples.into_iter().map(Ok).collect()),
        }
    }

    /// Creates an empty source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Appends a sample to the script.
    pub fn push_sample(&self, sample: FrameSample) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(sample));
    }

    /// Appends a read failure to the script.
    pub fn push_error(&self, message: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(anyhow::anyhow!("{message}")));
    }

    /// Returns the number of scripted items not yet pulled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl SignalSource for MockSignalSource {
    fn next_sample(&mut self) -> anyhow::Result<Option<FrameSample>> {
        match self
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
        {
            Some(Ok(sample)) => Ok(Some(sample)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }
}

/// A call observed by [`MockAudioAlert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCall {
    /// `play()` was invoked.
    Play,
    /// `stop()` was invoked.
    Stop,
}

/// Mock implementation of `AudioAlert` for testing.
///
/// Captures calls for later assertions and optionally fails every call.
pub struct MockAudioAlert {
    calls: Arc<Mutex<Vec<AudioCall>>>,
    fail: bool,
}

impl MockAudioAlert {
    /// Creates a new mock audio alert.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Creates a mock whose calls all fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Returns all captured calls in order.
    #[must_use]
    pub fn calls(&self) -> Vec<AudioCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of `play()` calls.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == AudioCall::Play)
            .count()
    }

    /// Returns the number of `stop()` calls.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == AudioCall::Stop)
            .count()
    }

    fn observe(&self, call: AudioCall) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
        if self.fail {
            anyhow::bail!("mock audio failure");
        }
        Ok(())
    }
}

impl Default for MockAudioAlert {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioAlert for MockAudioAlert {
    fn play(&self) -> anyhow::Result<()> {
        self.observe(AudioCall::Play)
    }

    fn stop(&self) -> anyhow::Result<()> {
        self.observe(AudioCall::Stop)
    }
}

/// Mock implementation of `Notifier` for testing.
///
/// Captures messages for later assertions and optionally fails every send.
pub struct MockNotifier {
    messages: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MockNotifier {
    /// Creates a new mock notifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Creates a mock whose sends all fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Returns all captured messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of sent messages.
    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.messages().len()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for MockNotifier {
    fn send_alert(&self, message: &str) -> anyhow::Result<()> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
        if self.fail {
            anyhow::bail!("mock notifier failure");
        }
        Ok(())
    }
}

/// Mock implementation of `EventLogger` for testing.
///
/// Captures events for later assertions.
pub struct MockEventLogger {
    events: Arc<Mutex<Vec<MonitorEvent>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockEventLogger {
    /// Creates a new mock event logger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<MonitorEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of captured events of the given kind.
    #[must_use]
    pub fn count_of(&self, kind: MonitorEventKind) -> usize {
        self.events().iter().filter(|e| e.kind == kind).count()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockEventLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLogger for MockEventLogger {
    fn record(&self, event: &MonitorEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*event);
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}

/// Mock implementation of `DisplayRenderer` for testing.
///
/// Captures updates for later assertions.
pub struct MockDisplay {
    updates: Arc<Mutex<Vec<DisplayUpdate>>>,
}

impl MockDisplay {
    /// Creates a new mock display.
    #[must_use]
    pub fn new() -> Self {
        Self {
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured updates.
    #[must_use]
    pub fn updates(&self) -> Vec<DisplayUpdate> {
        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of rendered ticks.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.updates().len()
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayRenderer for MockDisplay {
    fn render(&self, update: &DisplayUpdate) {
        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*update);
    }
}
