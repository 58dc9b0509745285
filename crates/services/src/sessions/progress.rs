/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 0-based index of the question on screen.
    pub index: usize,
    pub total: usize,
    /// `round(100 * (index + 1) / total)`, 0 for an empty quiz.
    pub percent: u32,
    pub is_last: bool,
}

impl QuizProgress {
    #[must_use]
    pub fn new(index: usize, total: usize) -> Self {
        Self {
            index,
            total,
            percent: quiz_core::score::progress_percent(index, total),
            is_last: total > 0 && index + 1 == total,
        }
    }

    /// 1-based question number for display.
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_quiz_has_zero_progress() {
        let progress = QuizProgress::new(0, 0);
        assert_eq!(progress.percent, 0);
        assert!(!progress.is_last);
    }

    #[test]
    fn last_question_is_flagged() {
        let progress = QuizProgress::new(2, 3);
        assert!(progress.is_last);
        assert_eq!(progress.percent, 100);
        assert_eq!(progress.number(), 3);
    }
}
