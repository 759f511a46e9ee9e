//! Request body parsing: turns `{ name?, image? }` into exactly one analysis input.

use base64::Engine;
use serde::Deserialize;

use crate::analysis::prompts::{
    IMAGE_ANALYSIS_PROMPT, IMAGE_MIME_TYPE, TEXT_ANALYSIS_PREAMBLE, TEXT_SHAPE_INSTRUCTION,
};
use crate::errors::{AppError, NO_CONTENT_MESSAGE};
use crate::llm_client::Part;

/// Body of `POST /api/gemini`. The browser always sends both keys; an absent,
/// null, or empty value counts as not supplied.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// What the gateway will actually analyze.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisInput {
    Text(String),
    /// Raw base64 image payload with the data-URL prefix removed.
    Image(String),
}

impl AnalysisInput {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisInput::Text(_) => "text",
            AnalysisInput::Image(_) => "image",
        }
    }

    /// Builds the prompt parts sent upstream for this input.
    pub fn to_parts(&self) -> Vec<Part> {
        match self {
            AnalysisInput::Text(text) => vec![
                Part::text(format!("{TEXT_ANALYSIS_PREAMBLE}{text}")),
                Part::text(TEXT_SHAPE_INSTRUCTION),
            ],
            AnalysisInput::Image(data) => vec![
                Part::text(IMAGE_ANALYSIS_PROMPT),
                Part::inline(IMAGE_MIME_TYPE, data.clone()),
            ],
        }
    }
}

impl TryFrom<AnalyzeRequest> for AnalysisInput {
    type Error = AppError;

    /// Image wins when both fields are populated.
    fn try_from(request: AnalyzeRequest) -> Result<Self, Self::Error> {
        if let Some(image) = request.image.filter(|s| !s.is_empty()) {
            let payload = clean_base64(strip_data_url(&image));
            validate_base64(&payload)?;
            return Ok(AnalysisInput::Image(payload));
        }
        if let Some(name) = request.name.filter(|s| !s.is_empty()) {
            return Ok(AnalysisInput::Text(name));
        }
        Err(AppError::InvalidInput(NO_CONTENT_MESSAGE.to_string()))
    }
}

/// Returns the payload after the first comma of a data URL
/// (`data:image/png;base64,AAAA` → `AAAA`). Input without a comma is
/// returned unchanged and treated as bare base64.
pub fn strip_data_url(value: &str) -> &str {
    match value.split_once(',') {
        Some((_, payload)) => payload,
        None => value,
    }
}

/// Drops line breaks and other ASCII whitespace that MIME-style encoders
/// wrap base64 with; the upstream API wants one unbroken string.
fn clean_base64(payload: &str) -> String {
    payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect()
}

fn validate_base64(payload: &str) -> Result<(), AppError> {
    if payload.is_empty() {
        return Err(AppError::InvalidInput("Image payload is empty".to_string()));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map(|_| ())
        .map_err(|e| AppError::InvalidInput(format!("Image is not valid base64: {e}")))
}
