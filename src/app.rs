use std::rc::Rc;

use log::error;

use crate::check::{self, ScoreReport};
use crate::input::{
    AnswerInput, MultiChoiceState, Shared, SingleChoiceState, TextEntryState, shared,
};
use crate::models::{AppState, InputKind, Question};

/// Widget state backing the quiz screen, one per question.
pub enum Widget {
    Text(Shared<TextEntryState>),
    Single(Shared<SingleChoiceState>),
    Multi(Shared<MultiChoiceState>),
    /// The question declared no usable input modality; nothing to render
    /// and nothing was bound.
    Missing,
}

pub struct App {
    pub state: AppState,
    questions: Vec<Question>,
    widgets: Vec<Widget>,
    current: usize,
    highlight: usize,
    report: Option<ScoreReport>,
    result_scroll: usize,
}

impl App {
    /// Builds the screen controller: one widget per question, with the
    /// matching answer input bound to the question.
    pub fn with_questions(mut questions: Vec<Question>) -> Self {
        let widgets = bind_inputs(&mut questions);
        Self {
            state: AppState::Welcome,
            questions,
            widgets,
            current: 0,
            highlight: 0,
            report: None,
            result_scroll: 0,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn current_widget(&self) -> &Widget {
        &self.widgets[self.current]
    }

    pub fn current_question_number(&self) -> usize {
        self.current + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    /// The finished scoring pass, present once the result screen is up.
    pub fn report(&self) -> Option<&ScoreReport> {
        self.report.as_ref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn text_entry_active(&self) -> bool {
        matches!(self.widgets[self.current], Widget::Text(_))
    }

    fn option_count(&self) -> usize {
        match &self.widgets[self.current] {
            Widget::Single(state) => state.borrow().options().len(),
            Widget::Multi(state) => state.borrow().options().len(),
            Widget::Text(_) | Widget::Missing => 0,
        }
    }

    pub fn highlight_next(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlight = (self.highlight + 1) % count;
        }
    }

    pub fn highlight_previous(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlight = (self.highlight + count - 1) % count;
        }
    }

    /// Selects (single choice) or toggles (multi choice) the highlighted
    /// option.
    pub fn toggle_highlighted(&mut self) {
        match &self.widgets[self.current] {
            Widget::Single(state) => state.borrow_mut().choose(self.highlight),
            Widget::Multi(state) => state.borrow_mut().toggle(self.highlight),
            Widget::Text(_) | Widget::Missing => {}
        }
    }

    pub fn type_char(&mut self, c: char) {
        if let Widget::Text(state) = &self.widgets[self.current] {
            state.borrow_mut().insert(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Widget::Text(state) = &self.widgets[self.current] {
            state.borrow_mut().backspace();
        }
    }

    pub fn start_quiz(&mut self) {
        if self.questions.is_empty() {
            self.finish_quiz();
            return;
        }
        self.state = AppState::Quiz;
    }

    /// Advances to the next question; past the last one the quiz is scored
    /// and the result screen takes over.
    pub fn next_question(&mut self) {
        self.current += 1;
        self.highlight = 0;
        if self.current >= self.questions.len() {
            self.finish_quiz();
        }
    }

    fn finish_quiz(&mut self) {
        self.report = Some(check::check_answers(&self.questions));
        self.state = AppState::Result;
    }

    pub fn scroll_results_down(&mut self) {
        if self.result_scroll + 1 < self.questions.len() {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Resets every input to blank and returns to the welcome screen.
    pub fn restart(&mut self) {
        check::reset_inputs(&self.questions);
        self.state = AppState::Welcome;
        self.current = 0;
        self.highlight = 0;
        self.report = None;
        self.result_scroll = 0;
    }
}

/// The bind phase: builds one widget per question from its modality and
/// binds the matching answer input. Questions without a usable modality get
/// no widget and will count as incorrect at check time.
fn bind_inputs(questions: &mut [Question]) -> Vec<Widget> {
    questions
        .iter_mut()
        .map(|question| {
            let Some(kind) = question.input_kind() else {
                error!(
                    "question {:?} has no usable input type, nothing bound",
                    question.text()
                );
                return Widget::Missing;
            };
            match kind {
                InputKind::FreeText => {
                    let state = shared(TextEntryState::default());
                    question.bind_input(AnswerInput::FreeText(Rc::clone(&state)));
                    Widget::Text(state)
                }
                InputKind::SingleChoice => {
                    let state = shared(SingleChoiceState::new(question.answers().to_vec()));
                    question.bind_input(AnswerInput::SingleChoice(Rc::clone(&state)));
                    Widget::Single(state)
                }
                InputKind::MultiChoice => {
                    let state = shared(MultiChoiceState::new(question.answers().to_vec()));
                    question.bind_input(AnswerInput::MultiChoice(Rc::clone(&state)));
                    Widget::Multi(state)
                }
            }
        })
        .collect()
}
