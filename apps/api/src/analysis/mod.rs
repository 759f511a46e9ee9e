// Analysis Gateway: text or image in, assessment record out.
// All model calls go through llm_client — no direct HTTP calls here.

pub mod analyzer;
pub mod extract;
pub mod handlers;
pub mod input;
pub mod prompts;
