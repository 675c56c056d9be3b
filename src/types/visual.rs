//! Visual signals reported by the content generator
//!
//! The generator returns an untyped field map. `VisualSignals::from_value` is the
//! only place that map is inspected: wrong-typed or missing fields become `None`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typed, partially-optional view of the generator's visual observations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualSignals {
    /// Image is in focus
    pub is_sharp: Option<bool>,
    /// Product is centered in frame (used when no simplicity score)
    pub is_centered: Option<bool>,
    /// Explicit composition simplicity, 0-10
    pub simplicity_score: Option<f64>,
    /// Strong contrast (used when no texture score)
    pub high_contrast: Option<bool>,
    /// Explicit texture/aesthetics, 0-10
    pub texture_aesthetics: Option<f64>,
    /// Product shown in a lifestyle context
    pub has_lifestyle: Option<bool>,
    /// Main object label, e.g. "necklace"
    pub core_object: Option<String>,
    /// Style label, e.g. "boho"
    pub style: Option<String>,
}

impl VisualSignals {
    /// Build from an untyped field map, defaulting anything unusable
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        Self {
            is_sharp: lookup(map, &["is_sharp", "sharp"]).and_then(as_flag),
            is_centered: lookup(map, &["is_centered", "centered"]).and_then(as_flag),
            simplicity_score: lookup(map, &["simplicity_score", "simplicity"]).and_then(as_number),
            high_contrast: lookup(map, &["high_contrast"]).and_then(as_flag),
            texture_aesthetics: lookup(map, &["texture_aesthetics", "texture"]).and_then(as_number),
            has_lifestyle: lookup(map, &["has_lifestyle", "lifestyle"]).and_then(as_flag),
            core_object: lookup(map, &["core_object"]).and_then(as_label),
            style: lookup(map, &["style"]).and_then(as_label),
        }
    }

    /// Core object label, lower-cased and trimmed ("" when absent)
    pub fn core_object_lower(&self) -> String {
        self.core_object
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default()
    }
}

/// First present key wins
fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k)).filter(|v| !v.is_null())
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_is_empty() {
        assert_eq!(VisualSignals::from_value(&json!("sharp")), VisualSignals::default());
        assert_eq!(VisualSignals::from_value(&json!([1, 2])), VisualSignals::default());
        assert_eq!(VisualSignals::from_value(&Value::Null), VisualSignals::default());
    }

    #[test]
    fn test_aliases() {
        let v = VisualSignals::from_value(&json!({
            "sharp": true,
            "centered": false,
            "high_contrast": true,
            "has_lifestyle": true
        }));
        assert_eq!(v.is_sharp, Some(true));
        assert_eq!(v.is_centered, Some(false));
        assert_eq!(v.high_contrast, Some(true));
        assert_eq!(v.has_lifestyle, Some(true));
    }

    #[test]
    fn test_mistyped_fields_default() {
        let v = VisualSignals::from_value(&json!({
            "is_sharp": 1,
            "simplicity_score": "lots",
            "texture_aesthetics": {"x": 1},
            "core_object": ["mug"]
        }));
        assert_eq!(v.is_sharp, None);
        assert_eq!(v.simplicity_score, None);
        assert_eq!(v.texture_aesthetics, None);
        assert_eq!(v.core_object, None);
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let v = VisualSignals::from_value(&json!({
            "simplicity_score": "8.5",
            "texture_aesthetics": 6,
            "is_sharp": "yes",
            "core_object": "  Ceramic Mug "
        }));
        assert_eq!(v.simplicity_score, Some(8.5));
        assert_eq!(v.texture_aesthetics, Some(6.0));
        assert_eq!(v.is_sharp, Some(true));
        assert_eq!(v.core_object_lower(), "ceramic mug");
    }
}
