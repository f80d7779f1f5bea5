pub(crate) mod ai_analysis;
pub(crate) mod question_import;
pub(crate) mod questions;
