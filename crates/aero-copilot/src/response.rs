//! Tolerant extraction of target suggestions from service responses.
//!
//! The service has been observed replying in three shapes: the target fields
//! at the top level, the same fields nested under a `controls` object, and a
//! JSON document string-encoded inside an `aiResponse` field. All three must
//! parse; anything unrecognizable degrades to an empty update so the prior
//! targets survive.

use aero_control::TargetUpdate;
use serde_json::Value;

/// Extract a target update from a raw response body.
///
/// Never fails: a body that isn't JSON, or JSON carrying no recognizable
/// target fields, yields an empty update.
pub fn extract_targets(body: &str) -> TargetUpdate {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => extract_from_value(&value),
        Err(error) => {
            tracing::warn!(%error, "copilot response body is not JSON; keeping prior targets");
            TargetUpdate::default()
        }
    }
}

/// Extract a target update from an already-parsed response value.
pub fn extract_from_value(value: &Value) -> TargetUpdate {
    // String-encoded document under `aiResponse` takes precedence.
    if let Some(encoded) = value.get("aiResponse").and_then(Value::as_str) {
        return match serde_json::from_str::<Value>(encoded) {
            Ok(inner) => TargetUpdate::from_json(&inner),
            Err(error) => {
                tracing::warn!(%error, "could not parse aiResponse payload; keeping prior targets");
                TargetUpdate::default()
            }
        };
    }

    if let Some(controls) = value.get("controls") {
        return TargetUpdate::from_json(controls);
    }

    TargetUpdate::from_json(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_shape() {
        let update = extract_targets(r#"{ "targetPitch": 0.2, "throttle": 0.8 }"#);
        assert_eq!(update.target_pitch, Some(0.2));
        assert_eq!(update.throttle, Some(0.8));
        assert_eq!(update.target_roll, None);
    }

    #[test]
    fn test_controls_nested_shape() {
        let update = extract_targets(r#"{ "controls": { "targetAltitude": 120.0 } }"#);
        assert_eq!(update.target_altitude, Some(120.0));
        assert!(update.target_pitch.is_none());
    }

    #[test]
    fn test_string_encoded_shape() {
        let update =
            extract_targets(r#"{ "aiResponse": "{ \"targetYaw\": -0.1, \"throttle\": 0.5 }" }"#);
        assert_eq!(update.target_yaw, Some(-0.1));
        assert_eq!(update.throttle, Some(0.5));
    }

    #[test]
    fn test_garbled_inner_document_yields_empty_update() {
        let update = extract_targets(r#"{ "aiResponse": "climb to 120" }"#);
        assert!(update.is_empty());
    }

    #[test]
    fn test_non_json_body_yields_empty_update() {
        assert!(extract_targets("<html>502 Bad Gateway</html>").is_empty());
        assert!(extract_targets("").is_empty());
    }

    #[test]
    fn test_explicit_zero_survives_every_shape() {
        assert_eq!(
            extract_targets(r#"{ "targetPitch": 0.0 }"#).target_pitch,
            Some(0.0)
        );
        assert_eq!(
            extract_targets(r#"{ "controls": { "targetPitch": 0.0 } }"#).target_pitch,
            Some(0.0)
        );
        assert_eq!(
            extract_targets(r#"{ "aiResponse": "{ \"targetPitch\": 0.0 }" }"#).target_pitch,
            Some(0.0)
        );
    }
}
