mod question;

pub use question::{ImageHandle, InputKind, Question, UnknownInputKind};

/// Which screen the app is currently showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
