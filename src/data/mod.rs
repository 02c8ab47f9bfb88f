mod loader;

pub use loader::{
    DirectoryImages, ImageResolver, LoadError, NoImages, load_quiz_file, parse_quiz,
};
