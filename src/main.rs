//! CLI entry point for retro-terminal
//!
//! This provides the interactive player and a content checker.

use retro_terminal::cli::{check::run_check, play::PlayerOptions, play::run_play};
use retro_terminal::infrastructure::repositories::{DEFAULT_CONTENT_PATH, FileContentSource};
use std::process;

#[tokio::main]
async fn main() {
    // Control verbosity with RUST_LOG, e.g. RUST_LOG=debug to trace navigation
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];
    let flags = &args[2..];
    let path = flags
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .map_or(DEFAULT_CONTENT_PATH, String::as_str);

    match command.as_str() {
        "play" => {
            let options = PlayerOptions {
                debug: flags.iter().any(|f| f == "--debug"),
                instant: flags.iter().any(|f| f == "--instant"),
            };
            let source = FileContentSource::new(path);
            if let Err(err) = run_play(&source, options).await {
                eprintln!("Error: Player mode failed");
                eprintln!("Reason: {err}");
                process::exit(1);
            }
        }
        "check" => {
            let source = FileContentSource::new(path);
            match run_check(&source, &mut std::io::stdout()).await {
                Ok(result) if result.has_errors() => process::exit(2),
                Ok(_) => {}
                Err(err) => {
                    eprintln!("Error: Failed to load '{path}'");
                    eprintln!("Reason: {err:#}");
                    process::exit(1);
                }
            }
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{command}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("retro-terminal - Narrative terminal player");
    println!();
    println!("USAGE:");
    println!("    retro-terminal play [content.json] [--debug] [--instant]");
    println!("    retro-terminal check [content.json]");
    println!();
    println!("COMMANDS:");
    println!("    play [file]     Play a content document interactively");
    println!("    check [file]    Report dangling references and unreachable nodes");
    println!("    --help, -h      Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --debug      Show history and variables after every screen");
    println!("    --instant    Disable the typewriter effect");
    println!();
    println!("The content file defaults to {DEFAULT_CONTENT_PATH}.");
}
