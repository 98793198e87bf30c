//! Command-line interface for edifact
//! Inspect EDIFACT files at every pipeline stage: tokens, segments,
//! parsed trees and envelope checks.
//!
//! Usage:
//!   edifact tokens `<path>`                                 - Dump the token stream
//!   edifact segments `<path>`                               - Dump assembled segments
//!   edifact parse `<path>` --spec `<spec>` [--format `<f>`]   - Parse against a message specification
//!   edifact check `<path>`                                  - Validate the interchange envelope

use clap::{Arg, Command};
use edifact::ast::treeviz::to_treeviz_str;
use edifact::processor;
use edifact::spec::message_spec::MessageSpec;
use std::path::Path;

fn main() {
    env_logger::init();

    let matches = Command::new("edifact")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting and validating EDIFACT files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens").about("Dump the token stream").arg(
                Arg::new("path")
                    .help("Path to the EDIFACT file")
                    .required(true)
                    .index(1),
            ),
        )
        .subcommand(
            Command::new("segments")
                .about("Dump assembled segments as JSON")
                .arg(
                    Arg::new("path")
                        .help("Path to the EDIFACT file")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a message against a specification")
                .arg(
                    Arg::new("path")
                        .help("Path to the EDIFACT file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("spec")
                        .long("spec")
                        .short('s')
                        .help("Path to the message specification (YAML or JSON)")
                        .required(true),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('treeviz' or 'json')")
                        .default_value("treeviz"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate the interchange envelope")
                .arg(
                    Arg::new("path")
                        .help("Path to the EDIFACT file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            handle_tokens_command(path);
        }
        Some(("segments", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            handle_segments_command(path);
        }
        Some(("parse", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let spec = sub.get_one::<String>("spec").unwrap();
            let format = sub.get_one::<String>("format").unwrap();
            handle_parse_command(path, spec, format);
        }
        Some(("check", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            handle_check_command(path);
        }
        _ => unreachable!(),
    }
}

fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

/// Handle the tokens command
fn handle_tokens_command(path: &str) {
    let tokens = processor::tokenize_file(Path::new(path)).unwrap_or_else(|e| fail(e));
    for token in &tokens {
        println!("{:?}", token);
    }
}

/// Handle the segments command
fn handle_segments_command(path: &str) {
    let segments = processor::read_segments_file(Path::new(path)).unwrap_or_else(|e| fail(e));
    let json = serde_json::to_string_pretty(&segments).unwrap_or_else(|e| fail(e));
    println!("{}", json);
}

/// Handle the parse command
fn handle_parse_command(path: &str, spec_path: &str, format: &str) {
    let spec: MessageSpec = processor::load_spec(Path::new(spec_path)).unwrap_or_else(|e| fail(e));
    let tree = processor::parse_message_file(Path::new(path), &spec).unwrap_or_else(|e| fail(e));

    match format {
        "treeviz" => print!("{}", to_treeviz_str(&tree)),
        "json" => {
            let json = serde_json::to_string_pretty(&tree).unwrap_or_else(|e| fail(e));
            println!("{}", json);
        }
        other => fail(format!("unknown output format {:?}", other)),
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let interchange = processor::read_interchange_file(Path::new(path)).unwrap_or_else(|e| fail(e));
    println!(
        "Interchange {} OK: {} message(s)",
        interchange.control_reference(),
        interchange.messages.len()
    );
    for message in &interchange.messages {
        println!("  UNH {}: {} segment(s)", message.reference(), message.segments.len());
    }
}
