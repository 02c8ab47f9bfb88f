use std::path::{Path, PathBuf};

use clap::Parser;
use xml_quiz::Quiz;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// XML file to load the questions from
    #[arg(short, long)]
    questions: PathBuf,

    /// File to write diagnostic logs to
    #[arg(long, default_value = "xml-quiz.log")]
    log_file: PathBuf,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_file) {
        eprintln!("Failed to set up logging: {}", e);
        std::process::exit(1);
    }

    let quiz = match Quiz::from_xml(&args.questions) {
        Ok(quiz) => quiz,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run() {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to a file: the quiz owns the terminal while it runs.
fn init_logging(path: &Path) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(path)?)
        .apply()?;
    Ok(())
}
