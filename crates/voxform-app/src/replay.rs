//! Drives a dictation session from a recorded script.
//!
//! The scripted engine emits one burst per start request. Whenever the
//! session has drained its queue and is still recording with no bursts left,
//! the user is considered done and the session is stopped.

use std::time::Duration;

use tokio::sync::mpsc;

use voxform_core::config::DictationConfig;
use voxform_core::error::{Result, VoxformError};
use voxform_dictation::{RecognitionSession, ScriptedCapability, SessionOptions};

use crate::script::Script;

/// Replay `script` and return the transcript delivered at the end of the cycle.
pub async fn replay(
    script: Script,
    config: &DictationConfig,
    end_timeout: Duration,
) -> Result<String> {
    let capability = ScriptedCapability::new().with_bursts(script.bursts);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<String>();

    let options = SessionOptions::from_config(config)
        .with_status_sink(|status| tracing::info!(status, "Status"))
        .with_target_sink(|text| tracing::debug!(field = text, "Field updated"))
        .with_on_end(move |transcript| {
            let _ = done_tx.send(transcript.to_string());
        });

    let mut session = RecognitionSession::with_capability(capability.clone(), options);
    if !session.start() {
        return Err(VoxformError::Dictation(
            "speech engine could not be started".to_string(),
        ));
    }

    loop {
        session.process_pending();
        if let Ok(transcript) = done_rx.try_recv() {
            tracing::info!(
                restarts = session.stats().engine_restarts,
                final_segments = session.stats().final_segments,
                "Replay finished"
            );
            return Ok(transcript);
        }

        if session.is_recording() {
            if capability.remaining_bursts() > 0 {
                // The engine went quiet without ending its stream.
                tracing::warn!(
                    remaining = capability.remaining_bursts(),
                    "Burst did not end the engine stream, remaining bursts skipped"
                );
            }
            session.stop();
            continue;
        }

        match tokio::time::timeout(end_timeout, session.next_event()).await {
            Ok(Some(event)) => session.dispatch(event),
            Ok(None) => {
                return Err(VoxformError::Dictation(
                    "engine event channel closed".to_string(),
                ))
            }
            Err(_) => {
                return Err(VoxformError::Dictation(format!(
                    "engine did not end within {} ms of stop",
                    end_timeout.as_millis()
                )))
            }
        }
    }
}
