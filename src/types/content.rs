//! Typed view of the content generator's output
//!
//! The generator (an external AI service) returns loosely shaped JSON. Fields are
//! read once here, with explicit defaults, so nothing downstream touches raw maps.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::MAX_SEASONALITY_MONTHS;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub suggested_title: Option<String>,
    pub suggested_description: String,
    /// Candidate tags before normalization
    pub tags_pool: Vec<String>,
    /// Raw visual field map, interpreted by `VisualSignals::from_value`
    pub visual_data: Value,
    /// Lowest observed competitor price, 0 when unknown
    pub price_min: f64,
    /// Generator's ceiling valuation for the category, 0 when unknown
    pub price_max_valuation: f64,
    /// Monthly demand indices, current month first
    pub monthly_popularity: Vec<f64>,
    pub trend_score: f64,
    pub best_months: Vec<String>,
}

impl GeneratedContent {
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            warn!("Generator output is not an object, using empty content");
            return Self::default();
        };

        let mut tags_pool = string_list(map.get("tags_pool_20"));
        if tags_pool.is_empty() {
            tags_pool = ["tags_focus", "tags_long_tail", "tags_aesthetic"]
                .iter()
                .flat_map(|key| string_list(map.get(*key)))
                .collect();
        }

        let visual_data = match map.get("visual_data") {
            Some(v) if v.is_object() => v.clone(),
            _ => Value::Object(Default::default()),
        };

        let monthly_popularity: Vec<f64> = match map.get("monthly_popularity") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(number)
                .filter(|d| *d >= 0.0)
                .take(MAX_SEASONALITY_MONTHS)
                .collect(),
            _ => Vec::new(),
        };

        let best_months = match map.get("best_months") {
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect(),
            other => string_list(other),
        };

        Self {
            suggested_title: map
                .get("suggested_title")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
            suggested_description: map
                .get("suggested_description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            tags_pool,
            visual_data,
            price_min: map.get("price_min").and_then(number).filter(|p| *p >= 0.0).unwrap_or(0.0),
            price_max_valuation: map
                .get("price_max_valuation")
                .and_then(number)
                .filter(|p| *p >= 0.0)
                .unwrap_or(0.0),
            monthly_popularity,
            trend_score: map.get("trend_score").and_then(number).unwrap_or(0.0),
            best_months,
        }
    }
}

/// Strings from a list; non-lists yield nothing, non-string items are skipped
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => Vec::new(),
    }
}

fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
