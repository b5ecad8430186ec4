//! # Kasir Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kelontong POS                                    │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Dashboard Front-end                           │  │
//! │  │  • Product Grid         • Cart Panel                             │  │
//! │  │  • Payment Modal        • Inventory / Reports                    │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ JSON lines (stdin/stdout)             │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    kasir (this binary)                           │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Parses arguments                                 │  │
//! │  │  lib.rs ─────► Logging, config, command loop                    │  │
//! │  │  commands/ ──► search_products, add_to_cart, process_payment    │  │
//! │  │  state/ ─────► AppState, ConfigState                            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```bash
//! kasir                          # config from KELONTONG_CONFIG or platform dir
//! kasir --config ./kasir.toml    # explicit config file
//! ```

use std::env;
use std::path::PathBuf;

/// What the command line asked for.
#[derive(Debug, PartialEq)]
enum Invocation {
    Serve { config_path: Option<PathBuf> },
    Help,
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let Some(path) = args.get(i + 1) else {
                    return Err(format!("{} requires a path", args[i]));
                };
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--help" | "-h" => return Ok(Invocation::Help),
            other => return Err(format!("unrecognised argument: {}", other)),
        }
        i += 1;
    }

    Ok(Invocation::Serve { config_path })
}

fn print_usage() {
    println!("Kelontong POS Kasir");
    println!();
    println!("Reads one JSON command per line on stdin and writes one JSON");
    println!("response per line on stdout. Logs go to stderr.");
    println!();
    println!("Usage: kasir [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Config file (default: platform config dir)");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Environment:");
    println!("  KELONTONG_CONFIG     Config file path");
    println!("  RUST_LOG             Log filter (default: info,kelontong=debug,kasir=debug)");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    match parse_args(&args) {
        Ok(Invocation::Help) => {
            print_usage();
            Ok(())
        }
        Ok(Invocation::Serve { config_path }) => kasir_lib::run(config_path),
        Err(message) => {
            eprintln!("Run `kasir --help` for usage.");
            Err(message.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("kasir")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_config_and_help() {
        assert_eq!(
            parse_args(&args(&[])),
            Ok(Invocation::Serve { config_path: None })
        );
        assert_eq!(
            parse_args(&args(&["-c", "./kasir.toml"])),
            Ok(Invocation::Serve {
                config_path: Some(PathBuf::from("./kasir.toml"))
            })
        );
        assert_eq!(parse_args(&args(&["--help"])), Ok(Invocation::Help));
    }

    #[test]
    fn test_bad_arguments_are_reported() {
        let err = parse_args(&args(&["--config"])).unwrap_err();
        assert!(err.contains("--config"));

        let err = parse_args(&args(&["--konfig", "x.toml"])).unwrap_err();
        assert!(err.contains("--konfig"));
    }
}
