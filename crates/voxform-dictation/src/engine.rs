//! Speech engine capability seams.
//!
//! A host supplies a `SpeechCapability` when it has a speech engine. The
//! session opens one `RecognitionEngine` handle per dictation cycle and hands
//! it an `EventSender`; the engine posts results, errors and end-of-stream
//! notifications there instead of invoking callbacks directly.
//!
//! - `ScriptedCapability` is a deterministic engine for tests and demos.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use crate::error::DictationError;
use crate::event::EngineEvent;

/// Channel end an engine posts its events to.
pub type EventSender = mpsc::UnboundedSender<EngineEvent>;

/// How the engine should listen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Keep listening across pauses instead of stopping after one phrase.
    pub continuous: bool,
    /// Report provisional slots before they are final.
    pub interim_results: bool,
    /// Engine locale tag such as `ta-IN`.
    pub locale_tag: String,
}

/// A live handle to a speech engine.
pub trait RecognitionEngine: Send {
    /// Apply settings. Engines may ignore changes while running.
    fn configure(&mut self, settings: &EngineSettings);

    /// Begin (or resume) capturing audio.
    fn start(&mut self) -> Result<(), DictationError>;

    /// Ask the engine to finish. Completion is reported later as `EngineEvent::End`.
    fn stop(&mut self) -> Result<(), DictationError>;
}

/// Host-provided access to a speech engine.
pub trait SpeechCapability: Send {
    /// Whether the engine can actually be used in this host.
    fn is_available(&self) -> bool {
        true
    }

    /// Create an engine handle that reports to `events`.
    fn open(&self, events: EventSender) -> Result<Box<dyn RecognitionEngine>, DictationError>;
}

// ---------------------------------------------------------------------------
// ScriptedCapability - deterministic engine for tests and replay
// ---------------------------------------------------------------------------

/// A call the session made on a scripted engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Open,
    Configure(EngineSettings),
    Start,
    Stop,
}

#[derive(Debug, Default)]
struct ScriptState {
    calls: Vec<EngineCall>,
    bursts: VecDeque<Vec<EngineEvent>>,
    sender: Option<EventSender>,
    running: bool,
    available: bool,
    fail_open: bool,
    fail_restarts: bool,
    fail_stop: bool,
    silent_stop: bool,
}

/// Speech capability whose engines replay pre-recorded event bursts.
///
/// Every successful `start` request emits the next queued burst. A `stop`
/// request on a running engine emits `EngineEvent::End`, as real engines do.
/// Clones share state, so a test can keep one clone for inspection and hand
/// the other to a session.
#[derive(Debug, Clone)]
pub struct ScriptedCapability {
    state: Arc<Mutex<ScriptState>>,
}

impl Default for ScriptedCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedCapability {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                available: true,
                ..ScriptState::default()
            })),
        }
    }

    /// Queue bursts; burst `n` is emitted on the `n`th successful start.
    pub fn with_bursts(self, bursts: Vec<Vec<EngineEvent>>) -> Self {
        self.lock().bursts.extend(bursts);
        self
    }

    /// Report the capability as present but unusable.
    pub fn unavailable(self) -> Self {
        self.lock().available = false;
        self
    }

    /// Make `open` fail.
    pub fn failing_open(self) -> Self {
        self.lock().fail_open = true;
        self
    }

    /// Make every `start` after a handle's first one fail.
    pub fn failing_restarts(self) -> Self {
        self.lock().fail_restarts = true;
        self
    }

    /// Make `stop` fail without emitting anything.
    pub fn failing_stop(self) -> Self {
        self.lock().fail_stop = true;
        self
    }

    /// Accept `stop` requests but never emit the matching end event.
    pub fn silent_stop(self) -> Self {
        self.lock().silent_stop = true;
        self
    }

    /// Post an event as if the engine produced it. Returns false when no
    /// handle has been opened or the session is gone.
    pub fn emit(&self, event: EngineEvent) -> bool {
        let mut state = self.lock();
        if matches!(event, EngineEvent::End) {
            state.running = false;
        }
        match state.sender {
            Some(ref tx) => tx.send(event).is_ok(),
            None => false,
        }
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.lock().calls.clone()
    }

    pub fn start_count(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Start))
    }

    pub fn stop_count(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Stop))
    }

    pub fn open_count(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Open))
    }

    /// Settings from the most recent `configure` call.
    pub fn last_settings(&self) -> Option<EngineSettings> {
        self.lock().calls.iter().rev().find_map(|c| match c {
            EngineCall::Configure(s) => Some(s.clone()),
            _ => None,
        })
    }

    pub fn remaining_bursts(&self) -> usize {
        self.lock().bursts.len()
    }

    fn count(&self, pred: impl Fn(&EngineCall) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| pred(c)).count()
    }

    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().expect("scripted engine mutex poisoned")
    }
}

impl SpeechCapability for ScriptedCapability {
    fn is_available(&self) -> bool {
        self.lock().available
    }

    fn open(&self, events: EventSender) -> Result<Box<dyn RecognitionEngine>, DictationError> {
        let mut state = self.lock();
        state.calls.push(EngineCall::Open);
        if !state.available {
            return Err(DictationError::UnsupportedCapability);
        }
        if state.fail_open {
            return Err(DictationError::Engine("service-not-allowed".to_string()));
        }
        state.sender = Some(events);
        state.running = false;
        Ok(Box::new(ScriptedEngine {
            state: Arc::clone(&self.state),
            starts: 0,
        }))
    }
}

/// Engine handle produced by `ScriptedCapability`.
#[derive(Debug)]
pub struct ScriptedEngine {
    state: Arc<Mutex<ScriptState>>,
    starts: usize,
}

impl RecognitionEngine for ScriptedEngine {
    fn configure(&mut self, settings: &EngineSettings) {
        let mut state = self.state.lock().expect("scripted engine mutex poisoned");
        state.calls.push(EngineCall::Configure(settings.clone()));
    }

    fn start(&mut self) -> Result<(), DictationError> {
        let mut state = self.state.lock().expect("scripted engine mutex poisoned");
        state.calls.push(EngineCall::Start);
        if state.fail_restarts && self.starts > 0 {
            return Err(DictationError::RestartFailure(
                "recognition has already started".to_string(),
            ));
        }
        self.starts += 1;
        state.running = true;

        let burst = state.bursts.pop_front().unwrap_or_default();
        for event in burst {
            if matches!(event, EngineEvent::End) {
                state.running = false;
            }
            if let Some(ref tx) = state.sender {
                let _ = tx.send(event);
            }
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), DictationError> {
        let mut state = self.state.lock().expect("scripted engine mutex poisoned");
        state.calls.push(EngineCall::Stop);
        if state.fail_stop {
            return Err(DictationError::Engine("invalid-state".to_string()));
        }
        if state.running && !state.silent_stop {
            state.running = false;
            if let Some(ref tx) = state.sender {
                let _ = tx.send(EngineEvent::End);
            }
        }
        Ok(())
    }
}
