//! Input widget state and answer extraction.
//!
//! Widget state is held behind [`Shared`] handles: the screen layer mutates
//! it on key events, the [`AnswerInput`] bound to the question reads it back
//! at check time. Everything runs on the single UI thread.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a widget's state.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a widget state into a [`Shared`] handle.
pub fn shared<T>(state: T) -> Shared<T> {
    Rc::new(RefCell::new(state))
}

/// A one-line free-text field.
#[derive(Clone, Debug, Default)]
pub struct TextEntryState {
    value: String,
}

impl TextEntryState {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn insert(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// A pick-one option group. Owns its option labels; `chosen` is an index
/// into them.
#[derive(Clone, Debug)]
pub struct SingleChoiceState {
    options: Vec<String>,
    chosen: Option<usize>,
}

impl SingleChoiceState {
    pub fn new(options: Vec<String>) -> Self {
        Self { options, chosen: None }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    /// Chooses an option; an out-of-range index is ignored.
    pub fn choose(&mut self, index: usize) {
        if index < self.options.len() {
            self.chosen = Some(index);
        }
    }

    pub fn clear(&mut self) {
        self.chosen = None;
    }
}

/// A check-any-number option group with a checked flag per option.
#[derive(Clone, Debug)]
pub struct MultiChoiceState {
    options: Vec<String>,
    checked: Vec<bool>,
}

impl MultiChoiceState {
    pub fn new(options: Vec<String>) -> Self {
        let checked = vec![false; options.len()];
        Self { options, checked }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.get(index).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(checked) = self.checked.get_mut(index) {
            *checked = !*checked;
        }
    }

    pub fn clear(&mut self) {
        self.checked.fill(false);
    }
}

/// Reads the submitted answer(s) out of the widget bound to a question and
/// can reset it to blank. One variant per input modality.
#[derive(Clone, Debug)]
pub enum AnswerInput {
    FreeText(Shared<TextEntryState>),
    SingleChoice(Shared<SingleChoiceState>),
    MultiChoice(Shared<MultiChoiceState>),
}

impl AnswerInput {
    /// The currently entered answer set. Free text always yields exactly one
    /// (possibly empty) string, single choice zero or one chosen label,
    /// multi choice one label per checked option in declaration order.
    pub fn read(&self) -> Vec<String> {
        match self {
            AnswerInput::FreeText(state) => vec![state.borrow().value().to_string()],
            AnswerInput::SingleChoice(state) => {
                let state = state.borrow();
                state
                    .chosen()
                    .and_then(|index| state.options().get(index))
                    .cloned()
                    .into_iter()
                    .collect()
            }
            AnswerInput::MultiChoice(state) => {
                let state = state.borrow();
                state
                    .options()
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| state.is_checked(*index))
                    .map(|(_, option)| option.clone())
                    .collect()
            }
        }
    }

    /// Restores the widget to its unselected/empty state.
    pub fn reset(&self) {
        match self {
            AnswerInput::FreeText(state) => state.borrow_mut().clear(),
            AnswerInput::SingleChoice(state) => state.borrow_mut().clear(),
            AnswerInput::MultiChoice(state) => state.borrow_mut().clear(),
        }
    }
}
