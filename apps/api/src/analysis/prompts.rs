// Analysis prompt templates.
// The wording is part of the upstream contract; change it only together with
// the extraction tests.

/// Leading instruction for text analysis. The user's article text is appended verbatim.
pub const TEXT_ANALYSIS_PREAMBLE: &str =
    "You are a news verification AI. Analyze this text for credibility and misinformation: ";

/// Second text part: pins the answer to the assessment record shape.
pub const TEXT_SHAPE_INSTRUCTION: &str = "Return only a valid JSON object with this exact structure: \
{analysis: string, reliability_score: number (0-100), confidence_level: number (0-100), \
flagged_keywords: string[], sentiment_score: number (-1 to 1)}";

/// Sole instruction for image analysis, sent alongside the inline image bytes.
pub const IMAGE_ANALYSIS_PROMPT: &str = "Analyze this image and detect any signs of manipulation, \
alteration, or fakery. Return a JSON response with the following structure: \
{analysis: string, reliability_score: number (0-100), confidence_level: number (0-100), \
flagged_keywords: string[], sentiment_score: number (-1 to 1)}";

/// Media type declared for every forwarded image, whatever the data URL says.
pub const IMAGE_MIME_TYPE: &str = "image/jpeg";
