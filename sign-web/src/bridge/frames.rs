//! Frame entry points - one recognizer per WASM instance
//!
//! WASM is single-threaded, so the recognizer lives in a thread_local and
//! every call borrows it briefly. Timestamps come from the JS clock.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::config::RecognizerConfig;
use crate::landmarks::{LandmarkFrame, CHANNEL_COUNT};
use crate::lexicon::SignLexicon;
use crate::pipeline::{FrameOutcome, SignRecognizer};

thread_local! {
    static RECOGNIZER: RefCell<Option<SignRecognizer>> = const { RefCell::new(None) };
}

/// Seconds, JS wall clock
fn js_now() -> f64 {
    js_sys::Date::now() / 1000.0
}

pub(super) fn with_recognizer<R>(f: impl FnOnce(&SignRecognizer) -> R) -> R {
    RECOGNIZER.with(|cell| {
        let mut slot = cell.borrow_mut();
        let recognizer = slot.get_or_insert_with(|| {
            SignRecognizer::with_lexicon(RecognizerConfig::default(), SignLexicon::standard())
        });
        f(recognizer)
    })
}

pub(super) fn replace_recognizer(recognizer: SignRecognizer) {
    RECOGNIZER.with(|cell| {
        *cell.borrow_mut() = Some(recognizer);
    });
}

fn to_json(outcome: &FrameOutcome) -> String {
    serde_json::to_string(outcome).unwrap_or_default()
}

/// Feed one frame of 63 floats (x, y, z per landmark)
///
/// Returns the outcome as JSON: `{label, confidence, sentence, committed?}`.
#[wasm_bindgen]
pub fn process_frame(session_id: &str, flat_data: &[f32]) -> String {
    with_recognizer(|recognizer| match LandmarkFrame::from_flat(flat_data) {
        Ok(frame) => to_json(&recognizer.process_frame_at(session_id, frame.points(), js_now())),
        Err(e) => {
            web_sys::console::warn_1(
                &format!("⚠️ Skipping frame ({} floats, need {}): {}", flat_data.len(), CHANNEL_COUNT, e)
                    .into(),
            );
            to_json(&FrameOutcome::rejected(recognizer.sentence(session_id)))
        }
    })
}

#[wasm_bindgen]
pub fn clear_session(session_id: &str) {
    with_recognizer(|recognizer| recognizer.clear_session(session_id));
}

#[wasm_bindgen]
pub fn get_sentence(session_id: &str) -> String {
    with_recognizer(|recognizer| recognizer.sentence(session_id))
}

/// Release a session's filter and sentence state
#[wasm_bindgen]
pub fn end_session(session_id: &str) -> bool {
    with_recognizer(|recognizer| recognizer.end_session(session_id).is_ok())
}
