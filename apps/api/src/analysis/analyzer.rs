//! Analysis pipeline: input → prompt parts → model → extracted record.

use tracing::{info, warn};

use crate::analysis::extract::extract_assessment;
use crate::analysis::input::AnalysisInput;
use crate::errors::AppError;
use crate::llm_client::ContentGenerator;
use crate::models::AssessmentRecord;

/// Runs one analysis.
///
/// Upstream failures propagate as `AppError::Upstream`. An answer that holds
/// no usable JSON is not an error: it downgrades to the default record.
pub async fn analyze(
    llm: &dyn ContentGenerator,
    input: &AnalysisInput,
) -> Result<AssessmentRecord, AppError> {
    let completion = llm.generate(&input.to_parts()).await?;

    match extract_assessment(&completion) {
        Some(record) => {
            info!(
                "Assessment extracted: reliability={} confidence={} keywords={}",
                record.reliability_score,
                record.confidence_level,
                record.flagged_keywords.len()
            );
            Ok(record)
        }
        None => {
            warn!(
                "No assessment JSON in model output ({} chars); returning default record",
                completion.len()
            );
            Ok(AssessmentRecord::default())
        }
    }
}
