//! Helpers shared by the integration tests

use sign_web::Landmark;

/// JSON `landmarks` message for a pose
pub fn landmarks_message(points: &[Landmark]) -> String {
    serde_json::json!({ "type": "landmarks", "data": points }).to_string()
}
