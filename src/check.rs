//! Answer checking over the loaded question list.

use std::fmt;

use log::{error, info};

use crate::models::Question;

/// Outcome of one scoring pass. `passed` holds the per-question outcomes in
/// question order; the `Display` form is the user-facing summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreReport {
    pub correct: usize,
    pub total: usize,
    pub passed: Vec<bool>,
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} correct answers out of {}", self.correct, self.total)
    }
}

/// Scores every question against its bound input. Per-question pass/fail
/// and the summary are logged; a question that cannot be checked counts as
/// incorrect and never aborts the pass.
pub fn check_answers(questions: &[Question]) -> ScoreReport {
    let mut passed = Vec::with_capacity(questions.len());
    for question in questions {
        let ok = check_question(question);
        if ok {
            info!("{}: answer is correct", question.text());
        } else {
            info!("{}: answer is incorrect", question.text());
        }
        passed.push(ok);
    }
    let correct = passed.iter().filter(|ok| **ok).count();
    let report = ScoreReport {
        correct,
        total: questions.len(),
        passed,
    };
    info!("{}", report);
    report
}

/// A question passes iff the multiset of extracted answers equals the
/// multiset of correct answers (compared as sorted lists).
pub fn check_question(question: &Question) -> bool {
    let Some(input) = question.input() else {
        error!("cannot check question {:?}, no input is bound", question.text());
        return false;
    };
    let mut given = input.read();
    let mut expected = question.correct_answers();
    // No answer at all, or a count mismatch, can never be correct. This also
    // covers questions with an empty correct set.
    if given.is_empty() || given.len() != expected.len() {
        info!(
            "{}: {} answer(s) given, {} expected",
            question.text(),
            given.len(),
            expected.len()
        );
        return false;
    }
    given.sort();
    expected.sort();
    given == expected
}

/// Puts every question's input back to its blank state. Produces no score.
pub fn reset_inputs(questions: &[Question]) {
    for question in questions {
        question.reset_input();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{
        AnswerInput, MultiChoiceState, Shared, SingleChoiceState, TextEntryState, shared,
    };
    use std::rc::Rc;

    fn single_question(choices: &[(&str, bool)]) -> (Question, Shared<SingleChoiceState>) {
        let mut question = Question::new();
        for (text, correct) in choices {
            question.add_answer(*text, *correct);
        }
        let state = shared(SingleChoiceState::new(question.answers().to_vec()));
        question.bind_input(AnswerInput::SingleChoice(Rc::clone(&state)));
        (question, state)
    }

    fn multi_question(choices: &[(&str, bool)]) -> (Question, Shared<MultiChoiceState>) {
        let mut question = Question::new();
        for (text, correct) in choices {
            question.add_answer(*text, *correct);
        }
        let state = shared(MultiChoiceState::new(question.answers().to_vec()));
        question.bind_input(AnswerInput::MultiChoice(Rc::clone(&state)));
        (question, state)
    }

    fn text_question(correct: &str) -> (Question, Shared<TextEntryState>) {
        let mut question = Question::new();
        question.add_answer(correct, true);
        let state = shared(TextEntryState::default());
        question.bind_input(AnswerInput::FreeText(Rc::clone(&state)));
        (question, state)
    }

    fn type_into(state: &Shared<TextEntryState>, text: &str) {
        for c in text.chars() {
            state.borrow_mut().insert(c);
        }
    }

    #[test]
    fn single_choice_scenarios() {
        let choices = [("Paris", true), ("London", false), ("Berlin", false)];

        let (question, state) = single_question(&choices);
        state.borrow_mut().choose(0);
        assert!(check_question(&question));

        let (question, state) = single_question(&choices);
        state.borrow_mut().choose(1);
        assert!(!check_question(&question));

        let (question, _state) = single_question(&choices);
        assert!(!check_question(&question));
    }

    #[test]
    fn multi_choice_scenarios() {
        let choices = [("A", true), ("B", false), ("C", true)];

        let (question, state) = multi_question(&choices);
        state.borrow_mut().toggle(0);
        state.borrow_mut().toggle(2);
        assert!(check_question(&question));

        let (question, state) = multi_question(&choices);
        state.borrow_mut().toggle(0);
        state.borrow_mut().toggle(1);
        state.borrow_mut().toggle(2);
        assert!(!check_question(&question));

        // Checking order does not matter, only the multiset does.
        let (question, state) = multi_question(&choices);
        state.borrow_mut().toggle(2);
        state.borrow_mut().toggle(0);
        assert!(check_question(&question));
    }

    #[test]
    fn free_text_requires_exact_match() {
        let (question, state) = text_question("Washington D.C.");
        type_into(&state, "Washington D.C.");
        assert!(check_question(&question));

        let (question, _state) = text_question("Washington D.C.");
        // One empty string is extracted, so the count matches but the
        // strings do not.
        assert!(!check_question(&question));
    }

    #[test]
    fn zero_correct_answers_never_score() {
        let choices = [("A", false), ("B", false)];

        let (question, _state) = multi_question(&choices);
        assert!(!check_question(&question));

        let (question, state) = multi_question(&choices);
        state.borrow_mut().toggle(0);
        assert!(!check_question(&question));
    }

    #[test]
    fn unbound_input_counts_as_incorrect() {
        let mut question = Question::new();
        question.set_text("No widget was built for this one.");
        question.add_answer("A", true);
        assert!(!check_question(&question));
    }

    #[test]
    fn reports_score_over_all_questions() {
        let (first, state) = single_question(&[("Paris", true), ("London", false)]);
        state.borrow_mut().choose(0);
        let (second, state) = text_question("Rome");
        type_into(&state, "Rome");
        let (third, state) = multi_question(&[("A", true), ("B", false)]);
        state.borrow_mut().toggle(1);

        let report = check_answers(&[first, second, third]);
        assert_eq!(report.correct, 2);
        assert_eq!(report.total, 3);
        assert_eq!(report.passed, vec![true, true, false]);
        assert_eq!(report.to_string(), "2 correct answers out of 3");
    }

    #[test]
    fn reset_restores_every_baseline_and_is_idempotent() {
        let (first, text_state) = text_question("Rome");
        type_into(&text_state, "Rome");
        let (second, single_state) = single_question(&[("Paris", true)]);
        single_state.borrow_mut().choose(0);
        let (third, multi_state) = multi_question(&[("A", true), ("B", false)]);
        multi_state.borrow_mut().toggle(0);
        let questions = [first, second, third];

        reset_inputs(&questions);
        reset_inputs(&questions);

        assert_eq!(questions[0].input().unwrap().read(), vec!["".to_string()]);
        assert!(questions[1].input().unwrap().read().is_empty());
        assert!(questions[2].input().unwrap().read().is_empty());
    }

    #[test]
    fn reset_skips_questions_without_an_input() {
        let mut unbound = Question::new();
        unbound.add_answer("A", true);
        let (bound, state) = single_question(&[("Paris", true)]);
        state.borrow_mut().choose(0);

        reset_inputs(&[unbound, bound.clone()]);
        assert!(bound.input().unwrap().read().is_empty());
    }
}
