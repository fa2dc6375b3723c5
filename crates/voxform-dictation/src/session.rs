//! Continuous dictation session.
//!
//! Speech engines end their audio stream on their own (silence timeouts,
//! network hiccups). `RecognitionSession` hides that: while the user has not
//! asked to stop, every end event immediately restarts the same engine
//! handle, so one logical dictation spans many engine runs. Final slots are
//! committed to a single transcript, which is trimmed and handed to `on_end`
//! once the user stops and the engine confirms.
//!
//! All operations take `&mut self` and run on the caller's thread. Engines
//! post `EngineEvent`s into a channel owned by the session; the host drains
//! it with [`RecognitionSession::process_pending`] or awaits
//! [`RecognitionSession::next_event`] and feeds [`RecognitionSession::dispatch`].

use std::collections::HashSet;

use tokio::sync::mpsc;

use voxform_core::config::{DictationConfig, StatusMessagesConfig};

use crate::engine::{EngineSettings, EventSender, RecognitionEngine, SpeechCapability};
use crate::event::{EngineEvent, RecognitionEvent};
use crate::locale::LocaleMap;
use crate::state::SessionState;
use crate::stats::CycleStats;
use crate::status::{SessionStatus, StatusText};

/// Receives a string to display (form field text or status line).
pub type TextSinkFn = Box<dyn FnMut(&str) + Send>;

/// Called after every result event with `(display, has_new_final)`.
pub type ResultFn = Box<dyn FnMut(&str, bool) + Send>;

/// Called once per cycle with the trimmed transcript.
pub type EndFn = Box<dyn FnMut(&str) + Send>;

/// Construction options for a `RecognitionSession`.
pub struct SessionOptions {
    pub target_sink: Option<TextSinkFn>,
    pub status_sink: Option<TextSinkFn>,
    pub on_result: Option<ResultFn>,
    pub on_end: Option<EndFn>,
    /// Short code or full locale tag.
    pub locale_code: String,
    pub continuous: bool,
    pub interim_results: bool,
    pub messages: StatusMessagesConfig,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            target_sink: None,
            status_sink: None,
            on_result: None,
            on_end: None,
            locale_code: "en".to_string(),
            continuous: true,
            interim_results: true,
            messages: StatusMessagesConfig::default(),
        }
    }
}

impl std::fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionOptions")
            .field("has_target_sink", &self.target_sink.is_some())
            .field("has_status_sink", &self.status_sink.is_some())
            .field("has_on_result", &self.on_result.is_some())
            .field("has_on_end", &self.on_end.is_some())
            .field("locale_code", &self.locale_code)
            .field("continuous", &self.continuous)
            .field("interim_results", &self.interim_results)
            .finish()
    }
}

impl SessionOptions {
    /// Options from the `[dictation]` config section, with no sinks attached.
    pub fn from_config(config: &DictationConfig) -> Self {
        Self {
            locale_code: config.locale_code.clone(),
            continuous: config.continuous,
            interim_results: config.interim_results,
            messages: config.messages.clone(),
            ..Self::default()
        }
    }

    pub fn with_target_sink(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.target_sink = Some(Box::new(sink));
        self
    }

    pub fn with_status_sink(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.status_sink = Some(Box::new(sink));
        self
    }

    pub fn with_on_result(mut self, callback: impl FnMut(&str, bool) + Send + 'static) -> Self {
        self.on_result = Some(Box::new(callback));
        self
    }

    pub fn with_on_end(mut self, callback: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_end = Some(Box::new(callback));
        self
    }
}

/// One logical dictation context (typically one form field).
pub struct RecognitionSession {
    /// `None` when the host has no usable speech engine.
    capability: Option<Box<dyn SpeechCapability>>,
    /// Live only while Recording or Stopping.
    engine: Option<Box<dyn RecognitionEngine>>,
    state: SessionState,
    transcript: String,
    /// Slot positions of the current engine run already in the transcript.
    committed_slots: HashSet<usize>,
    /// A stop request has been sent to the current engine handle.
    stop_requested: bool,
    locale_tag: String,
    continuous: bool,
    interim_results: bool,
    status: StatusText,
    target_sink: Option<TextSinkFn>,
    status_sink: Option<TextSinkFn>,
    on_result: Option<ResultFn>,
    on_end: Option<EndFn>,
    events_tx: EventSender,
    events_rx: mpsc::UnboundedReceiver<EngineEvent>,
    stats: CycleStats,
}

impl std::fmt::Debug for RecognitionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognitionSession")
            .field("supported", &self.capability.is_some())
            .field("has_engine", &self.engine.is_some())
            .field("state", &self.state)
            .field("transcript", &self.transcript)
            .field("locale_tag", &self.locale_tag)
            .field("stats", &self.stats)
            .finish()
    }
}

impl RecognitionSession {
    /// Create a session. Support is decided here, once: a missing or
    /// unavailable capability leaves the session permanently Idle.
    pub fn new(capability: Option<Box<dyn SpeechCapability>>, options: SessionOptions) -> Self {
        let capability = capability.filter(|c| c.is_available());
        if capability.is_none() {
            tracing::warn!("Speech recognition not supported in this host");
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            capability,
            engine: None,
            state: SessionState::Idle,
            transcript: String::new(),
            committed_slots: HashSet::new(),
            stop_requested: false,
            locale_tag: LocaleMap::resolve(&options.locale_code),
            continuous: options.continuous,
            interim_results: options.interim_results,
            status: StatusText::new(options.messages),
            target_sink: options.target_sink,
            status_sink: options.status_sink,
            on_result: options.on_result,
            on_end: options.on_end,
            events_tx,
            events_rx,
            stats: CycleStats::new(),
        }
    }

    /// Convenience constructor taking the capability by value.
    pub fn with_capability(
        capability: impl SpeechCapability + 'static,
        options: SessionOptions,
    ) -> Self {
        Self::new(Some(Box::new(capability)), options)
    }

    pub fn is_supported(&self) -> bool {
        self.capability.is_some()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Committed text so far. Trimmed once the cycle has stopped.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn locale_tag(&self) -> &str {
        &self.locale_tag
    }

    /// Counters for the current (or last) cycle.
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Begin a new dictation cycle.
    ///
    /// Clears the transcript, opens an engine handle and asks it to start.
    /// Returns false when the host has no engine, when a stop is still in
    /// flight, or when the engine handle cannot be opened. The transcript is
    /// cleared even if opening fails.
    ///
    /// The status sink gets the "speak now" text; "listening" is written
    /// only while provisional text is on screen.
    pub fn start(&mut self) -> bool {
        if self.capability.is_none() {
            self.set_status(SessionStatus::Unsupported);
            return false;
        }

        match self.state {
            SessionState::Recording => {
                self.set_status(SessionStatus::SpeakNow);
                return true;
            }
            SessionState::Stopping => {
                tracing::debug!("start() ignored while waiting for the engine to end");
                return false;
            }
            SessionState::Idle | SessionState::Stopped => {}
        }

        // Anything still queued belongs to a handle that is already gone.
        while self.events_rx.try_recv().is_ok() {}

        self.transcript.clear();
        self.committed_slots.clear();
        self.stop_requested = false;
        self.stats = CycleStats::new();

        let opened = match self.capability.as_ref() {
            Some(capability) => capability.open(self.events_tx.clone()),
            None => return false,
        };
        let mut engine = match opened {
            Ok(engine) => engine,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open speech engine");
                self.set_status(SessionStatus::Error(e.to_string()));
                return false;
            }
        };

        engine.configure(&self.settings());
        if let Err(e) = engine.start() {
            tracing::debug!(error = %e, "Engine start rejected, assuming it is already running");
        }

        self.engine = Some(engine);
        self.transition(SessionState::Recording);

        tracing::info!(
            cycle_id = %self.stats.cycle_id,
            locale = %self.locale_tag,
            "Dictation started"
        );
        self.set_status(SessionStatus::SpeakNow);
        true
    }

    /// Ask the engine to finish. The transcript is delivered later, when
    /// the engine's end event arrives. No-op unless Recording.
    pub fn stop(&mut self) {
        if self.state != SessionState::Recording {
            tracing::debug!(state = %self.state, "stop() ignored");
            return;
        }
        self.transition(SessionState::Stopping);
        self.request_engine_stop();
    }

    /// Stop if recording, otherwise start. Returns whether the session is
    /// recording afterwards.
    pub fn toggle(&mut self) -> bool {
        if self.is_recording() {
            self.stop();
        } else {
            self.start();
        }
        self.is_recording()
    }

    /// Change the recognition language for the next `start()`.
    ///
    /// A live engine is reconfigured too, but may keep its old language
    /// until it restarts.
    pub fn set_locale(&mut self, code: &str) {
        self.locale_tag = LocaleMap::resolve(code);
        tracing::debug!(locale = %self.locale_tag, "Locale set");
        let settings = self.settings();
        if let Some(engine) = self.engine.as_mut() {
            engine.configure(&settings);
        }
    }

    /// Route one engine message to its handler.
    pub fn dispatch(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Result(result) => self.on_segment(&result),
            EngineEvent::Error(message) => self.on_engine_error(&message),
            EngineEvent::End => self.on_engine_end(),
        }
    }

    /// Dispatch every queued engine event. Returns how many were handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    /// Wait for the next engine event.
    pub async fn next_event(&mut self) -> Option<EngineEvent> {
        self.events_rx.recv().await
    }

    /// Handle a batch of recognition results.
    pub fn on_segment(&mut self, event: &RecognitionEvent) {
        if !self.state.has_engine() {
            tracing::debug!(state = %self.state, "Result event without a live engine ignored");
            return;
        }

        let mut interim = String::new();
        let mut has_new_final = false;

        for (offset, slot) in event.changed_slots().iter().enumerate() {
            let position = event.index + offset;
            if slot.is_final {
                if !self.committed_slots.insert(position) {
                    continue;
                }
                self.transcript.push_str(&slot.text);
                self.transcript.push(' ');
                self.stats.final_segments += 1;
                has_new_final = true;
            } else {
                interim.push_str(&slot.text);
            }
        }

        let display = format!("{}{}", self.transcript, interim);
        if let Some(sink) = self.target_sink.as_mut() {
            sink(&display);
        }
        if let Some(callback) = self.on_result.as_mut() {
            callback(&display, has_new_final);
        }

        let status = if interim.is_empty() {
            SessionStatus::SpeakNow
        } else {
            SessionStatus::Listening
        };
        self.set_status(status);
    }

    /// Handle an engine failure: report it and wind the cycle down.
    pub fn on_engine_error(&mut self, message: &str) {
        if !self.state.has_engine() {
            tracing::debug!(state = %self.state, error = message, "Engine error without a live engine ignored");
            return;
        }

        tracing::warn!(error = message, "Speech engine error");
        self.stats.engine_errors += 1;
        self.set_status(SessionStatus::Error(message.to_string()));

        if self.state == SessionState::Recording {
            self.transition(SessionState::Stopping);
        }
        self.request_engine_stop();
    }

    /// Handle the end of the engine's audio stream.
    pub fn on_engine_end(&mut self) {
        match self.state {
            SessionState::Recording => self.restart_engine(),
            SessionState::Stopping => self.finish_cycle(),
            SessionState::Idle | SessionState::Stopped => {
                tracing::debug!(state = %self.state, "End event without a live engine ignored");
            }
        }
    }

    /// One restart attempt on the same handle. Failures are dropped.
    fn restart_engine(&mut self) {
        // A fresh engine run numbers its slots from zero again.
        self.committed_slots.clear();

        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match engine.start() {
            Ok(()) => {
                self.stats.engine_restarts += 1;
                tracing::debug!(
                    restarts = self.stats.engine_restarts,
                    "Engine ended on its own, restarted"
                );
            }
            Err(e) => {
                self.stats.failed_restarts += 1;
                tracing::debug!(error = %e, "Engine restart failed, ignoring");
            }
        }
        self.transition(SessionState::Recording);
    }

    fn finish_cycle(&mut self) {
        let trimmed_len = self.transcript.trim_end().len();
        self.transcript.truncate(trimmed_len);

        self.engine = None;
        self.transition(SessionState::Stopped);
        self.set_status(SessionStatus::Stopped);

        tracing::info!(
            cycle_id = %self.stats.cycle_id,
            elapsed_secs = self.stats.elapsed_secs(),
            restarts = self.stats.engine_restarts,
            failed_restarts = self.stats.failed_restarts,
            final_segments = self.stats.final_segments,
            transcript_len = self.transcript.len(),
            "Dictation finished"
        );

        if let Some(callback) = self.on_end.as_mut() {
            callback(&self.transcript);
        }
    }

    /// At most one stop request per engine handle.
    fn request_engine_stop(&mut self) {
        if self.stop_requested {
            return;
        }
        self.stop_requested = true;
        if let Some(engine) = self.engine.as_mut() {
            if let Err(e) = engine.stop() {
                tracing::debug!(error = %e, "Engine stop request failed, ignoring");
            }
        }
    }

    fn transition(&mut self, target: SessionState) {
        if self.state.can_transition_to(&target) {
            tracing::debug!("Session state: {} -> {}", self.state, target);
            self.state = target;
        } else {
            tracing::warn!("Invalid session state transition: {} -> {}", self.state, target);
        }
    }

    fn settings(&self) -> EngineSettings {
        EngineSettings {
            continuous: self.continuous,
            interim_results: self.interim_results,
            locale_tag: self.locale_tag.clone(),
        }
    }

    fn set_status(&mut self, status: SessionStatus) {
        let text = self.status.render(&status);
        if let Some(sink) = self.status_sink.as_mut() {
            sink(&text);
        }
    }
}

impl Drop for RecognitionSession {
    fn drop(&mut self) {
        if self.engine.is_some() {
            tracing::debug!(state = %self.state, "Session dropped with a live engine, stopping it");
            self.request_engine_stop();
            self.engine = None;
        }
    }
}
