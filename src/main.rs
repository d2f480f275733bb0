use std::{fs, io::ErrorKind, path::PathBuf, process};

use clap::{Parser, Subcommand};
use luz::{error::ExitCode, host::StdHost};

/// luz is a small, dynamically typed, expression-oriented scripting
/// language.
#[derive(Parser, Debug)]
#[command(name = "luz", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// A `.luz` script to run; `.` means `main.luz` in the current
    /// directory.
    filepath: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Runs a script file.
    #[command(alias = "r")]
    Run {
        /// Prints the debug formatting of every top-level result to
        /// stderr.
        #[arg(short, long)]
        debug: bool,

        /// The `.luz` script to run.
        filepath: PathBuf,
    },
}

fn main() {
    let args = Args::parse();

    let (filepath, debug) = match args.command {
        Some(Command::Run { debug, filepath }) => (filepath, debug),
        None => match args.filepath {
            Some(filepath) => (filepath, false),
            None => {
                eprintln!("Usage: luz run [--debug] <filepath>  or  luz <filepath>");
                process::exit(ExitCode::IncorrectUsage.code());
            },
        },
    };

    let filepath = if filepath.as_os_str() == "." {
        PathBuf::from("main.luz")
    } else {
        filepath
    };

    if filepath.extension().is_none_or(|ext| ext != "luz") {
        eprintln!("'{}' is not a .luz file.", filepath.display());
        process::exit(ExitCode::InvalidFilePath.code());
    }

    let source = fs::read_to_string(&filepath).unwrap_or_else(|e| {
        let code = match e.kind() {
            ErrorKind::NotFound => ExitCode::FileNotFound,
            ErrorKind::PermissionDenied => ExitCode::PermissionDenied,
            _ => ExitCode::Error,
        };
        eprintln!("Failed to read '{}': {e}.", filepath.display());
        process::exit(code.code());
    });

    let mut host = StdHost::new();
    let code = luz::run(&source, &mut host, debug);
    process::exit(code.code());
}
