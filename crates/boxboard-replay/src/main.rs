//! Replay entry point.

use boxboard_core::{PrimaryModifier, ShortcutRegistry};
use boxboard_replay::{ReplayError, default_config_json, load, run};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "boxboard-replay", about = "Replay scripted input through the Boxboard engine")]
struct Cli {
    /// Script file; reads stdin when omitted or `-`.
    script: Option<PathBuf>,

    /// Print the keyboard shortcuts and exit.
    #[arg(long)]
    shortcuts: bool,

    /// Print the default editor config as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

fn read_script(path: Option<&PathBuf>) -> Result<String, ReplayError> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read_to_string(path)
                .map_err(|e| ReplayError::Io(format!("{}: {}", path.display(), e)))
        }
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| ReplayError::Io(e.to_string()))?;
            Ok(buffer)
        }
    }
}

fn replay(cli: &Cli) -> Result<String, ReplayError> {
    let source = read_script(cli.script.as_ref())?;
    let script = load(&source)?;
    let report = run(script)?;
    report.to_json_pretty()
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.shortcuts {
        println!("\n=== Keyboard Shortcuts ===");
        for line in ShortcutRegistry::lines(PrimaryModifier::default()) {
            println!("  {}", line);
        }
        return ExitCode::SUCCESS;
    }

    let output = if cli.print_config {
        default_config_json()
    } else {
        replay(&cli)
    };

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
