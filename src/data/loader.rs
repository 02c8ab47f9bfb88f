//! Quiz markup loader.
//!
//! Quiz data is a small XML document:
//!
//! ```xml
//! <quiz>
//!     <question>
//!         <image>city-skyline</image>
//!         <text>What is the capital of the USA?</text>
//!         <input>single</input>
//!         <answer correct="false">New York City</answer>
//!         <answer correct="true">Washington D.C.</answer>
//!     </question>
//! </quiz>
//! ```
//!
//! `<image>` is optional, `<input>` is one of `text`, `single` or `multi`,
//! and the `correct` attribute defaults to false when absent or unreadable.
//! The parser walks the pull-event stream with an explicit tag stack; an end
//! tag arriving while the stack is empty fails the whole load, everything
//! else degrades to a logged record on the affected question.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, warn};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::models::{ImageHandle, InputKind, Question};

/// Resolves the symbolic name from `<image>` to something the host can
/// actually display.
pub trait ImageResolver {
    fn resolve(&self, name: &str) -> Option<ImageHandle>;
}

/// Resolver for hosts without image assets.
pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve(&self, _name: &str) -> Option<ImageHandle> {
        None
    }
}

/// Looks the symbolic name up as an image file in an asset directory.
pub struct DirectoryImages {
    root: PathBuf,
}

impl DirectoryImages {
    const EXTENSIONS: [&'static str; 4] = ["png", "jpg", "jpeg", "gif"];

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageResolver for DirectoryImages {
    fn resolve(&self, name: &str) -> Option<ImageHandle> {
        Self::EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
            .map(ImageHandle)
    }
}

/// Error loading a quiz. Every variant aborts the load with no partial
/// result.
#[derive(Debug)]
pub enum LoadError {
    /// Could not read the quiz file.
    Io { path: PathBuf, source: io::Error },
    /// The markup itself is ill-formed.
    Xml(quick_xml::Error),
    /// An end tag arrived while no tag was open.
    UnbalancedClose { tag: String },
    /// The document parsed but contains no questions.
    NoQuestions,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::Xml(e) => write!(f, "malformed quiz markup: {}", e),
            LoadError::UnbalancedClose { tag } => {
                write!(f, "closing tag </{}> with no tag open", tag)
            }
            LoadError::NoQuestions => write!(f, "quiz contains no questions"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Xml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for LoadError {
    fn from(err: quick_xml::Error) -> Self {
        LoadError::Xml(err)
    }
}

/// Reads and parses a quiz file, resolving image names relative to
/// `resolver`. An empty question list is rejected: the caller must be able
/// to treat a successful load as a presentable quiz.
pub fn load_quiz_file(path: &Path, resolver: &dyn ImageResolver) -> Result<Vec<Question>, LoadError> {
    let markup = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let questions = parse_quiz(&markup, resolver)?;
    if questions.is_empty() {
        return Err(LoadError::NoQuestions);
    }
    Ok(questions)
}

/// Parses quiz markup into the ordered question list, which may be empty.
pub fn parse_quiz(markup: &str, resolver: &dyn ImageResolver) -> Result<Vec<Question>, LoadError> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text_start = true;
    config.trim_text_end = true;
    config.expand_empty_elements = true;
    // The tag stack below is the structural authority; let unmatched end
    // tags through so they reach its emptiness check.
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut tag_stack: Vec<String> = Vec::new();
    let mut questions: Vec<Question> = Vec::new();
    let mut current: Option<Question> = None;
    let mut answer_is_correct = false;

    debug!("begin quiz document");
    loop {
        match reader.read_event()? {
            Event::Start(tag) => {
                let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
                debug!("open <{}>, depth {}", name, tag_stack.len() + 1);
                match name.as_str() {
                    "question" => current = Some(Question::new()),
                    "answer" => answer_is_correct = correct_attribute(&tag),
                    _ => {}
                }
                tag_stack.push(name);
            }
            Event::End(tag) => {
                let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
                if tag_stack.pop().is_none() {
                    error!("closing tag </{}> while no tag is open", name);
                    return Err(LoadError::UnbalancedClose { tag: name });
                }
                debug!("close </{}>, depth {}", name, tag_stack.len());
                if name == "question" {
                    match current.take() {
                        Some(question) => questions.push(question),
                        None => warn!("</question> without a matching open question"),
                    }
                }
            }
            Event::Text(text) => {
                let content = text.unescape()?.into_owned();
                if content.is_empty() {
                    continue;
                }
                let Some(tag) = tag_stack.last() else {
                    warn!("dropping text outside of any tag: {:?}", content);
                    continue;
                };
                let Some(question) = current.as_mut() else {
                    error!("dropping text {:?} under <{}>: no question open", content, tag);
                    continue;
                };
                match tag.as_str() {
                    "image" => match resolver.resolve(&content) {
                        Some(handle) => question.set_image(handle),
                        None => warn!("no image found for {:?}", content),
                    },
                    "text" => question.set_text(content),
                    "input" => match content.parse::<InputKind>() {
                        Ok(kind) => question.set_input_kind(kind),
                        Err(e) => error!("{}", e),
                    },
                    "answer" => question.add_answer(content, answer_is_correct),
                    other => error!("dropping text {:?} under unexpected tag <{}>", content, other),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    debug!("end quiz document, {} question(s)", questions.len());
    Ok(questions)
}

/// The `correct` attribute of an `<answer>` tag; false when absent or
/// unreadable.
fn correct_attribute(tag: &BytesStart) -> bool {
    for attribute in tag.attributes() {
        match attribute {
            Ok(attribute) if attribute.key.as_ref() == b"correct" => {
                return match attribute.unescape_value() {
                    Ok(value) => value.eq_ignore_ascii_case("true"),
                    Err(e) => {
                        warn!("unreadable correct attribute: {}", e);
                        false
                    }
                };
            }
            Ok(_) => {}
            Err(e) => warn!("malformed attribute on <answer>: {}", e),
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneImage;

    impl ImageResolver for OneImage {
        fn resolve(&self, name: &str) -> Option<ImageHandle> {
            (name == "city-skyline").then(|| ImageHandle(PathBuf::from("assets/city-skyline.png")))
        }
    }

    const CAPITALS: &str = r#"
        <quiz>
            <question>
                <image>city-skyline</image>
                <text>What is the capital of the USA?</text>
                <input>single</input>
                <answer correct="false">New York City</answer>
                <answer correct="true">Washington D.C.</answer>
                <answer correct="false">Chicago</answer>
            </question>
            <question>
                <text>Which of these are US state capitals?</text>
                <input>multi</input>
                <answer correct="true">Austin</answer>
                <answer correct="false">Los Angeles</answer>
                <answer correct="true">Sacramento</answer>
            </question>
            <question>
                <text>Name the capital of France.</text>
                <input>text</input>
                <answer correct="true">Paris</answer>
            </question>
        </quiz>
    "#;

    #[test]
    fn parses_one_question_per_open_close_pair() {
        let questions = parse_quiz(CAPITALS, &NoImages).unwrap();
        assert_eq!(questions.len(), 3);
    }

    #[test]
    fn populates_all_question_fields() {
        let questions = parse_quiz(CAPITALS, &OneImage).unwrap();

        let first = &questions[0];
        assert_eq!(first.text(), "What is the capital of the USA?");
        assert_eq!(first.input_kind(), Some(InputKind::SingleChoice));
        assert_eq!(first.answer_count(), 3);
        assert_eq!(first.correct_answers(), vec!["Washington D.C."]);
        assert_eq!(
            first.image(),
            Some(&ImageHandle(PathBuf::from("assets/city-skyline.png")))
        );

        let second = &questions[1];
        assert_eq!(second.input_kind(), Some(InputKind::MultiChoice));
        assert_eq!(second.correct_answers(), vec!["Austin", "Sacramento"]);

        let third = &questions[2];
        assert_eq!(third.input_kind(), Some(InputKind::FreeText));
        assert_eq!(third.correct_answers(), vec!["Paris"]);
    }

    #[test]
    fn correct_multiset_is_independent_of_choice_order() {
        let reordered = r#"
            <quiz>
                <question>
                    <text>Which of these are US state capitals?</text>
                    <input>multi</input>
                    <answer correct="true">Sacramento</answer>
                    <answer correct="false">Los Angeles</answer>
                    <answer correct="true">Austin</answer>
                </question>
            </quiz>
        "#;
        let questions = parse_quiz(reordered, &NoImages).unwrap();
        let mut correct = questions[0].correct_answers();
        correct.sort();
        assert_eq!(correct, vec!["Austin", "Sacramento"]);
        assert_eq!(questions[0].answer_count(), 3);
    }

    #[test]
    fn missing_correct_attribute_defaults_to_false() {
        let markup = r#"
            <quiz>
                <question>
                    <text>Pick one.</text>
                    <input>single</input>
                    <answer>Unmarked</answer>
                    <answer correct="maybe">Malformed</answer>
                    <answer correct="TRUE">Case insensitive</answer>
                </question>
            </quiz>
        "#;
        let questions = parse_quiz(markup, &NoImages).unwrap();
        assert_eq!(questions[0].correct_answers(), vec!["Case insensitive"]);
    }

    #[test]
    fn unknown_tags_and_stray_text_are_dropped() {
        let markup = r#"
            <quiz>
                stray text
                <question>
                    <note>not part of the format</note>
                    <text>Still parsed?</text>
                    <input>text</input>
                    <answer correct="true">Yes</answer>
                </question>
            </quiz>
        "#;
        let questions = parse_quiz(markup, &NoImages).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text(), "Still parsed?");
        assert_eq!(questions[0].correct_answers(), vec!["Yes"]);
    }

    #[test]
    fn unknown_input_kind_leaves_modality_unset() {
        let markup = r#"
            <quiz>
                <question>
                    <text>Widget?</text>
                    <input>radio</input>
                    <answer correct="true">A</answer>
                </question>
            </quiz>
        "#;
        let questions = parse_quiz(markup, &NoImages).unwrap();
        assert_eq!(questions[0].input_kind(), None);
    }

    #[test]
    fn unresolved_image_leaves_field_empty() {
        let questions = parse_quiz(CAPITALS, &NoImages).unwrap();
        assert_eq!(questions[0].image(), None);
    }

    #[test]
    fn close_with_no_open_tag_fails_the_load() {
        let result = parse_quiz("<quiz></quiz></quiz>", &NoImages);
        assert!(matches!(result, Err(LoadError::UnbalancedClose { tag }) if tag == "quiz"));
    }

    #[test]
    fn empty_document_parses_to_empty_list() {
        let questions = parse_quiz("<quiz></quiz>", &NoImages).unwrap();
        assert!(questions.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_quiz_file(Path::new("does-not-exist.xml"), &NoImages);
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
