use serde::{Deserialize, Deserializer, Serialize};

pub const RELIABILITY_RANGE: (f64, f64) = (0.0, 100.0);
pub const CONFIDENCE_RANGE: (f64, f64) = (0.0, 100.0);
pub const SENTIMENT_RANGE: (f64, f64) = (-1.0, 1.0);

/// The fixed-shape result returned for every analysis request.
///
/// Every field has a default so a partially-filled model answer still yields
/// a complete record. `Default` is the "no result" record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub analysis: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub reliability_score: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub confidence_level: f64,
    #[serde(default, deserialize_with = "lenient_keywords")]
    pub flagged_keywords: Vec<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sentiment_score: f64,
}

impl AssessmentRecord {
    /// Clamps every score into its documented range.
    pub fn normalized(self) -> Self {
        Self {
            reliability_score: clamp(self.reliability_score, RELIABILITY_RANGE),
            confidence_level: clamp(self.confidence_level, CONFIDENCE_RANGE),
            sentiment_score: clamp(self.sentiment_score, SENTIMENT_RANGE),
            ..self
        }
    }
}

/// Body of a failed analysis: the default record plus an error tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub error: String,
    #[serde(flatten)]
    pub record: AssessmentRecord,
}

impl FailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            record: AssessmentRecord::default(),
        }
    }
}

fn clamp(value: f64, (min, max): (f64, f64)) -> f64 {
    value.clamp(min, max)
}

/// Accepts a JSON number, a numeric string (`"85"`, `"85%"`), or null.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Raw::Number(n)) => Ok(n),
        Some(Raw::Text(s)) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {s:?}"))),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_keywords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_record_serializes_all_fields() {
        let value = serde_json::to_value(AssessmentRecord::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "analysis": "",
                "reliability_score": 0.0,
                "confidence_level": 0.0,
                "flagged_keywords": [],
                "sentiment_score": 0.0
            })
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let record: AssessmentRecord =
            serde_json::from_str(r#"{"analysis": "Looks fine", "reliability_score": 70}"#).unwrap();
        assert_eq!(record.analysis, "Looks fine");
        assert_eq!(record.reliability_score, 70.0);
        assert_eq!(record.confidence_level, 0.0);
        assert!(record.flagged_keywords.is_empty());
    }

    #[test]
    fn test_numeric_strings_and_nulls_are_accepted() {
        let record: AssessmentRecord = serde_json::from_str(
            r#"{"reliability_score": "85%", "confidence_level": null, "flagged_keywords": null, "analysis": null}"#,
        )
        .unwrap();
        assert_eq!(record.reliability_score, 85.0);
        assert_eq!(record.confidence_level, 0.0);
        assert!(record.flagged_keywords.is_empty());
        assert_eq!(record.analysis, "");
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        assert!(serde_json::from_str::<AssessmentRecord>(r#"{"reliability_score": "high"}"#).is_err());
        assert!(serde_json::from_str::<AssessmentRecord>(r#"{"flagged_keywords": "a, b"}"#).is_err());
    }

    #[test]
    fn test_normalized_clamps_out_of_range_scores() {
        let record = AssessmentRecord {
            reliability_score: 140.0,
            confidence_level: -3.0,
            sentiment_score: -2.5,
            ..Default::default()
        }
        .normalized();
        assert_eq!(record.reliability_score, 100.0);
        assert_eq!(record.confidence_level, 0.0);
        assert_eq!(record.sentiment_score, -1.0);
    }

    #[test]
    fn test_failure_response_flattens_record() {
        let value = serde_json::to_value(FailureResponse::new("Failed to process request")).unwrap();
        assert_eq!(value["error"], "Failed to process request");
        assert_eq!(value["analysis"], "");
        assert_eq!(value["reliability_score"], 0.0);
        assert_eq!(value["flagged_keywords"], json!([]));
        assert_eq!(value["sentiment_score"], 0.0);
    }
}
