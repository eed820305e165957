//! JSON message schema of the landmark stream
//!
//! Clients send `landmarks`, `clear` / `command`, and `refine_sentence`
//! messages; the recognizer answers with `prediction`, `cleared`,
//! `refined_sentence` or `error`. One handler call per inbound message.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::landmarks::Landmark;
use crate::pipeline::SignRecognizer;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Landmarks {
        #[serde(default)]
        data: Option<Vec<Landmark>>,
        /// Alias some clients use for `data`
        #[serde(default)]
        landmarks: Option<Vec<Landmark>>,
    },
    Clear {
        #[serde(default)]
        action: Option<String>,
    },
    Command {
        #[serde(default)]
        action: Option<String>,
    },
    RefineSentence,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Prediction {
        gesture: Option<String>,
        confidence: f32,
        sentence: String,
        timestamp: String,
    },
    Cleared {
        timestamp: String,
    },
    RefinedSentence {
        original: String,
        refined: String,
        timestamp: String,
    },
    Error {
        message: String,
    },
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Apply one message to `session_id` at time `now` (seconds)
///
/// Returns `None` for messages that get no reply: empty landmark lists,
/// commands other than `clear`, and refinement of an empty sentence.
pub fn handle_message(
    recognizer: &SignRecognizer,
    session_id: &str,
    message: ClientMessage,
    now: f64,
) -> Option<ServerMessage> {
    match message {
        ClientMessage::Landmarks { data, landmarks } => {
            let points = data.filter(|d| !d.is_empty()).or(landmarks)?;
            if points.is_empty() {
                return None;
            }
            let outcome = recognizer.process_frame_at(session_id, &points, now);
            Some(ServerMessage::Prediction {
                gesture: outcome.label,
                confidence: round2(outcome.confidence),
                sentence: outcome.sentence,
                timestamp: timestamp(),
            })
        }
        ClientMessage::Clear { action } | ClientMessage::Command { action } => {
            match action.as_deref().unwrap_or("clear") {
                "clear" => {
                    recognizer.clear_session(session_id);
                    Some(ServerMessage::Cleared {
                        timestamp: timestamp(),
                    })
                }
                other => {
                    debug!(session = session_id, action = other, "Ignoring command");
                    None
                }
            }
        }
        ClientMessage::RefineSentence => {
            let refinement = recognizer.refine(session_id);
            if refinement.original.is_empty() {
                return None;
            }
            Some(ServerMessage::RefinedSentence {
                original: refinement.original,
                refined: refinement.refined,
                timestamp: timestamp(),
            })
        }
    }
}

/// Parse and apply one JSON text message
///
/// Malformed JSON and unknown message types are answered with an `error`
/// reply instead of being dropped, so a client can tell a bad message from
/// a frame that produced no prediction.
pub fn handle_text(
    recognizer: &SignRecognizer,
    session_id: &str,
    text: &str,
    now: f64,
) -> Option<ServerMessage> {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => handle_message(recognizer, session_id, message, now),
        Err(e) => Some(ServerMessage::Error {
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecognizerConfig;
    use crate::hand::fixtures::{pose, POINTING};
    use crate::hand::PalmOrientation;

    fn recognizer() -> SignRecognizer {
        SignRecognizer::new(RecognizerConfig::default()).unwrap()
    }

    fn landmarks_json(key: &str) -> String {
        let points = pose(POINTING, PalmOrientation::Up);
        format!(
            r#"{{"type":"landmarks","{key}":{}}}"#,
            serde_json::to_string(&points).unwrap()
        )
    }

    #[test]
    fn test_parse_messages() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"command","action":"clear"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Command {
                action: Some("clear".into())
            }
        );
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"refine_sentence"}"#).unwrap();
        assert_eq!(msg, ClientMessage::RefineSentence);

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"landmarks","data":[{"x":0.1,"y":0.2}]}"#).unwrap();
        match msg {
            ClientMessage::Landmarks { data: Some(points), .. } => assert_eq!(points[0].z, 0.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_prediction_reply() {
        let r = recognizer();
        let reply = handle_text(&r, "s", &landmarks_json("data"), 0.0);
        match reply {
            Some(ServerMessage::Prediction {
                gesture,
                confidence,
                sentence,
                ..
            }) => {
                assert_eq!(gesture.as_deref(), Some("1"));
                assert_eq!(confidence, 1.0);
                assert_eq!(sentence, "");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_landmarks_alias() {
        let r = recognizer();
        let reply = handle_text(&r, "s", &landmarks_json("landmarks"), 0.0);
        assert!(matches!(reply, Some(ServerMessage::Prediction { .. })));
    }

    #[test]
    fn test_empty_landmarks_no_reply() {
        let r = recognizer();
        assert_eq!(handle_text(&r, "s", r#"{"type":"landmarks","data":[]}"#, 0.0), None);
        assert!(r.registry().is_empty());
    }

    #[test]
    fn test_clear_and_unknown_command() {
        let r = recognizer();
        assert!(matches!(
            handle_text(&r, "s", r#"{"type":"clear"}"#, 0.0),
            Some(ServerMessage::Cleared { .. })
        ));
        assert_eq!(handle_text(&r, "s", r#"{"type":"command","action":"undo"}"#, 0.0), None);
    }

    #[test]
    fn test_bad_messages_get_error_reply() {
        let r = recognizer();
        assert!(matches!(
            handle_text(&r, "s", "{not json", 0.0),
            Some(ServerMessage::Error { .. })
        ));
        assert!(matches!(
            handle_text(&r, "s", r#"{"type":"dance"}"#, 0.0),
            Some(ServerMessage::Error { .. })
        ));
        assert!(r.registry().is_empty());
    }

    #[test]
    fn test_refine_empty_sentence_no_reply() {
        let r = recognizer();
        assert_eq!(handle_text(&r, "s", r#"{"type":"refine_sentence"}"#, 0.0), None);
    }

    #[test]
    fn test_rounding_and_wire_format() {
        assert_eq!(round2(0.666_666), 0.67);
        let json = serde_json::to_value(ServerMessage::Error {
            message: "bad".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "bad");
    }
}
