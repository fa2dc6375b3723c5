//! Voxform dictation crate - continuous speech-to-text sessions for form fields.
//!
//! Speech engines stop on their own after a pause. `RecognitionSession` keeps
//! restarting its engine until the user stops, commits final results to one
//! running transcript, and reports the trimmed transcript once per cycle:
//! Idle -> Recording -> Stopping -> Stopped (-> Recording on the next start).

pub mod engine;
pub mod error;
pub mod event;
pub mod locale;
pub mod session;
pub mod state;
pub mod stats;
pub mod status;

pub use engine::{
    EngineCall, EngineSettings, EventSender, RecognitionEngine, ScriptedCapability,
    SpeechCapability,
};
pub use error::DictationError;
pub use event::{EngineEvent, RecognitionEvent, ResultSlot};
pub use locale::LocaleMap;
pub use session::{RecognitionSession, SessionOptions};
pub use state::SessionState;
pub use stats::CycleStats;
pub use status::{SessionStatus, StatusText};
