use serde::{Deserialize, Serialize};
use validator::Validate;

/// Verdict returned by the grading model. Exactly these five keys; anything
/// else in the model output is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct AnalysisResult {
    #[validate(length(min = 1, message = "stepsAnalysis must not be empty"))]
    pub(crate) steps_analysis: String,
    #[validate(length(min = 1, message = "answerAnalysis must not be empty"))]
    pub(crate) answer_analysis: String,
    pub(crate) steps_correct: bool,
    pub(crate) answer_correct: bool,
    pub(crate) readable: bool,
}
