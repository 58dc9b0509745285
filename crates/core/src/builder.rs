use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{QuizQuestion, RawQuestion};

/// Build a randomized quiz from a topic's raw questions.
///
/// Question order is shuffled, then each question's options are shuffled
/// independently. The correct option's landing position becomes
/// `answer_index`. Every call draws fresh randomness from `rng`, so two
/// builds over the same input are free to differ.
///
/// An empty input yields an empty quiz.
pub fn build_quiz<R: Rng + ?Sized>(rng: &mut R, raw: &[RawQuestion]) -> Vec<QuizQuestion> {
    let mut order: Vec<&RawQuestion> = raw.iter().collect();
    order.shuffle(rng);

    order
        .into_iter()
        .map(|question| shuffle_question(rng, question))
        .collect()
}

fn shuffle_question<R: Rng + ?Sized>(rng: &mut R, question: &RawQuestion) -> QuizQuestion {
    // Tag each option with whether it is the correct one before shuffling,
    // so the answer is tracked by identity rather than by text lookup.
    let mut options: Vec<(bool, &str)> = std::iter::once((true, question.correct()))
        .chain(question.incorrect().iter().map(|text| (false, text.as_str())))
        .collect();
    options.shuffle(rng);

    let answer_index = options
        .iter()
        .position(|(correct, _)| *correct)
        .unwrap_or_default();

    QuizQuestion::new(
        question.prompt().to_owned(),
        options.into_iter().map(|(_, text)| text.to_owned()).collect(),
        answer_index,
        question.explanation().to_owned(),
    )
}
