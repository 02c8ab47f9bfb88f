use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use log::error;

use crate::input::AnswerInput;

/// Resolved location of a question's header image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageHandle(pub PathBuf);

/// Input widget family used to collect an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    FreeText,
    SingleChoice,
    MultiChoice,
}

impl FromStr for InputKind {
    type Err = UnknownInputKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(InputKind::FreeText),
            "single" => Ok(InputKind::SingleChoice),
            "multi" => Ok(InputKind::MultiChoice),
            other => Err(UnknownInputKind(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub struct UnknownInputKind(pub String);

impl fmt::Display for UnknownInputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown input type {:?}", self.0)
    }
}

impl std::error::Error for UnknownInputKind {}

/// One quiz question: its text, possible answers with correctness flags,
/// the input modality, and (once the screen is built) the bound input to
/// extract the user's answer from.
///
/// The loader creates it empty and populates it field by field; after it is
/// appended to the question list only the input binding still changes, and
/// that exactly once.
#[derive(Clone, Debug, Default)]
pub struct Question {
    image: Option<ImageHandle>,
    text: String,
    input_kind: Option<InputKind>,
    answers: Vec<String>,
    answer_is_correct: Vec<bool>,
    correct_indexes: Vec<usize>,
    input: Option<AnswerInput>,
}

impl Question {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_image(&mut self, image: ImageHandle) {
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_input_kind(&mut self, kind: InputKind) {
        self.input_kind = Some(kind);
    }

    pub fn input_kind(&self) -> Option<InputKind> {
        self.input_kind
    }

    /// Appends a possible answer; `correct` marks it part of the expected
    /// answer set. Insertion order is display order, duplicates allowed.
    pub fn add_answer(&mut self, text: impl Into<String>, correct: bool) {
        if correct {
            self.correct_indexes.push(self.answers.len());
        }
        self.answers.push(text.into());
        self.answer_is_correct.push(correct);
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    /// Whether the answer at `index` is marked correct.
    pub fn is_correct(&self, index: usize) -> bool {
        self.answer_is_correct.get(index).copied().unwrap_or(false)
    }

    /// The correct-answer multiset: choice strings at the indexes marked
    /// correct, duplicates preserved.
    pub fn correct_answers(&self) -> Vec<String> {
        self.correct_indexes
            .iter()
            .map(|&index| self.answers[index].clone())
            .collect()
    }

    /// Binds the input to extract this question's answer from. The binding
    /// is set exactly once; a second attempt is logged and ignored.
    pub fn bind_input(&mut self, input: AnswerInput) {
        if self.input.is_some() {
            error!("input already bound for question {:?}, ignoring rebind", self.text);
            return;
        }
        self.input = Some(input);
    }

    pub fn input(&self) -> Option<&AnswerInput> {
        self.input.as_ref()
    }

    /// Resets the bound input to its blank state.
    pub fn reset_input(&self) {
        match &self.input {
            Some(input) => input.reset(),
            None => error!("cannot reset input, none bound for question {:?}", self.text),
        }
    }
}
