/// A shuffled, session-specific rendering of a `RawQuestion`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    prompt: String,
    options: Vec<String>,
    answer_index: usize,
    explanation: String,
}

impl QuizQuestion {
    pub(crate) fn new(
        prompt: String,
        options: Vec<String>,
        answer_index: usize,
        explanation: String,
    ) -> Self {
        debug_assert!(answer_index < options.len());
        Self {
            prompt,
            options,
            answer_index,
            explanation,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Position of the correct option in `options`.
    #[must_use]
    pub fn answer_index(&self) -> usize {
        self.answer_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.answer_index
    }
}
