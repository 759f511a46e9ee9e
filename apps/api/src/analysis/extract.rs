//! Best-effort extraction of an assessment record from free-text model output.
//!
//! The model is asked for JSON but may wrap it in prose or code fences, or
//! mention other brace-delimited text around it. Strategy:
//!
//! 1. strip code fences;
//! 2. scan every `{` in order, find its balanced `}` (string-literal aware) and
//!    take the first span that parses as an object carrying at least one
//!    assessment field;
//! 3. fall back to the greedy first-`{`-to-last-`}` span.
//!
//! `None` means nothing usable was found; the caller substitutes the default record.

use serde_json::Value;

use crate::models::AssessmentRecord;

const RECORD_FIELDS: &[&str] = &[
    "analysis",
    "reliability_score",
    "confidence_level",
    "flagged_keywords",
    "sentiment_score",
];

pub fn extract_assessment(raw: &str) -> Option<AssessmentRecord> {
    let text = unfence(raw);

    balanced_spans(text)
        .find_map(parse_record_strict)
        .or_else(|| greedy_span(text).and_then(parse_record))
        .map(AssessmentRecord::normalized)
}

/// Removes a surrounding markdown code block. The opening fence line may
/// carry any info string (```json, ```JSON, ```javascript); a missing
/// closing fence is tolerated.
fn unfence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(after_ticks) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match after_ticks.split_once('\n') {
        Some((_info, rest)) => rest,
        None => after_ticks.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    body.trim_end().trim_end_matches("```").trim()
}

/// Parses a span only if it is an object that names at least one record field.
/// Keeps nested helper objects (`{}` or `{"source": ...}`) from winning.
fn parse_record_strict(span: &str) -> Option<AssessmentRecord> {
    let value: Value = serde_json::from_str(span).ok()?;
    let object = value.as_object()?;
    if !RECORD_FIELDS.iter().any(|f| object.contains_key(*f)) {
        return None;
    }
    serde_json::from_value(value).ok()
}

fn parse_record(span: &str) -> Option<AssessmentRecord> {
    serde_json::from_str(span).ok()
}

/// First `{` through last `}`, inclusive.
fn greedy_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Yields every balanced `{...}` span, in order of its opening brace.
fn balanced_spans(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('{')
        .filter_map(move |(start, _)| matching_close(&text[start..]).map(|len| &text[start..start + len]))
}

/// Given text starting with `{`, returns the byte length of the balanced
/// object including its closing `}`. Braces inside JSON strings are ignored.
fn matching_close(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKY_JSON: &str = r#"{"analysis":"Unverified claim","reliability_score":10,"confidence_level":80,"flagged_keywords":["sky","government"],"sentiment_score":-0.6}"#;

    fn sky_record() -> AssessmentRecord {
        AssessmentRecord {
            analysis: "Unverified claim".to_string(),
            reliability_score: 10.0,
            confidence_level: 80.0,
            flagged_keywords: vec!["sky".to_string(), "government".to_string()],
            sentiment_score: -0.6,
        }
    }

    #[test]
    fn test_bare_json() {
        assert_eq!(extract_assessment(SKY_JSON), Some(sky_record()));
    }

    #[test]
    fn test_json_inside_prose() {
        let raw = format!("Sure! Here is my assessment:\n{SKY_JSON}\nLet me know if you need more.");
        assert_eq!(extract_assessment(&raw), Some(sky_record()));
    }

    #[test]
    fn test_json_inside_code_fence() {
        let raw = format!("```json\n{SKY_JSON}\n```");
        assert_eq!(extract_assessment(&raw), Some(sky_record()));
    }

    #[test]
    fn test_fenced_json_with_prose_before() {
        let raw = format!("Result:\n```json\n{SKY_JSON}\n```\nDone.");
        assert_eq!(extract_assessment(&raw), Some(sky_record()));
    }

    #[test]
    fn test_no_braces_is_none() {
        assert_eq!(extract_assessment("I cannot analyze this content."), None);
    }

    #[test]
    fn test_invalid_json_span_is_none() {
        assert_eq!(
            extract_assessment("{analysis: string, reliability_score: number}"),
            None
        );
    }

    #[test]
    fn test_trailing_braces_do_not_break_extraction() {
        // The greedy span would swallow "{like this}" and fail to parse.
        let raw = format!("{SKY_JSON}\nNote: placeholders look {{like this}}.");
        assert_eq!(extract_assessment(&raw), Some(sky_record()));
    }

    #[test]
    fn test_leading_schema_echo_is_skipped() {
        let raw = format!("Schema: {{analysis: string}}\nAnswer: {SKY_JSON}");
        assert_eq!(extract_assessment(&raw), Some(sky_record()));
    }

    #[test]
    fn test_braces_inside_strings() {
        let raw = r#"{"analysis":"Uses {placeholders} and \"quotes\" }","reliability_score":55}"#;
        let record = extract_assessment(raw).unwrap();
        assert_eq!(record.analysis, r#"Uses {placeholders} and "quotes" }"#);
        assert_eq!(record.reliability_score, 55.0);
    }

    #[test]
    fn test_nested_objects_pick_outer_record() {
        let raw = r#"{"analysis":"ok","meta":{"source":"x"},"reliability_score":42}"#;
        let record = extract_assessment(raw).unwrap();
        assert_eq!(record.reliability_score, 42.0);
    }

    #[test]
    fn test_wrong_field_types_are_none() {
        assert_eq!(
            extract_assessment(r#"{"analysis":"x","reliability_score":"very high"}"#),
            None
        );
    }

    #[test]
    fn test_scores_are_clamped() {
        let record = extract_assessment(r#"{"reliability_score":250,"sentiment_score":3}"#).unwrap();
        assert_eq!(record.reliability_score, 100.0);
        assert_eq!(record.sentiment_score, 1.0);
    }

    #[test]
    fn test_unfence_variants() {
        assert_eq!(unfence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(unfence("```JSON\n{\"a\": 1}\n```\n"), "{\"a\": 1}");
        assert_eq!(unfence("```\n{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(unfence("```json{\"a\": 1}```"), "{\"a\": 1}");
        assert_eq!(unfence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_uppercase_fence_tag() {
        let raw = format!("```JSON\n{SKY_JSON}\n```");
        assert_eq!(extract_assessment(&raw), Some(sky_record()));
    }

    #[test]
    fn test_matching_close_unbalanced() {
        assert_eq!(matching_close("{\"a\": {"), None);
        assert_eq!(matching_close("{}"), Some(2));
    }

    #[test]
    fn test_greedy_span() {
        assert_eq!(greedy_span("a {b} c {d} e"), Some("{b} c {d}"));
        assert_eq!(greedy_span("} only {"), None);
    }
}
