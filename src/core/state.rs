use std::sync::Arc;

use crate::core::config::Settings;
use crate::services::ai_analysis::SubmissionAnalyzer;
use crate::services::questions::QuestionStore;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    questions: Arc<dyn QuestionStore>,
    analyzer: Arc<dyn SubmissionAnalyzer>,
}

impl AppState {
    pub(crate) fn new(
        settings: Settings,
        questions: Arc<dyn QuestionStore>,
        analyzer: Arc<dyn SubmissionAnalyzer>,
    ) -> Self {
        Self { inner: Arc::new(InnerState { settings, questions, analyzer }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn questions(&self) -> &dyn QuestionStore {
        self.inner.questions.as_ref()
    }

    pub(crate) fn analyzer(&self) -> &dyn SubmissionAnalyzer {
        self.inner.analyzer.as_ref()
    }
}
