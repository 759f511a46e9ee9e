pub mod assessment;

pub use assessment::{AssessmentRecord, FailureResponse};
