//! Studium CLI

use clap::Parser;
use std::path::{Path, PathBuf};
use studium::interp::{Explainer, Interpreter};

const LANGUAGE_EXTENSION: &str = "stud";

#[derive(Parser)]
#[command(
    name = "studium",
    version,
    about = "Studium - a tiny teaching language made by students, for students"
)]
struct Cli {
    /// Source file to run (must end in .stud)
    file: PathBuf,

    /// Narrate decisions while running (learn mode)
    #[arg(long)]
    explain: bool,

    /// Dump the parsed syntax tree before running (debug)
    #[arg(long)]
    dump_ast: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_file(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn has_valid_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(LANGUAGE_EXTENSION)
}

fn run_file(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !has_valid_extension(&cli.file) {
        return Err(format!(
            "invalid file extension, please only use .{LANGUAGE_EXTENSION}"
        )
        .into());
    }

    let source = std::fs::read_to_string(&cli.file)?;
    let filename = cli.file.display().to_string();

    let tokens = match studium::lexer::tokenize(&source) {
        Ok(tokens) => tokens,
        Err(e) => {
            studium::error::report_error(&filename, &source, &e);
            std::process::exit(1);
        }
    };

    let program = match studium::parser::parse(&filename, &source, tokens) {
        Ok(program) => program,
        Err(e) => {
            studium::error::report_error(&filename, &source, &e);
            std::process::exit(1);
        }
    };

    if cli.dump_ast {
        println!("{}", serde_json::to_string_pretty(&program)?);
    }

    let mut interp = Interpreter::new();
    if cli.explain {
        interp.set_tracer(Box::new(Explainer::new(source.clone())));
    }
    interp.run(&program)?;

    Ok(())
}
