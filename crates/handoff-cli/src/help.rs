// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Help text for CLI commands.

use colored::Colorize;

use crate::output;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_usage() {
    println!(
        "{} {} - Bounded producer/consumer handoff",
        output::title("handoff"),
        output::version(VERSION)
    );
    println!();
    println!(
        "{}: {} {} {}",
        output::section_header("Usage"),
        output::command("handoff"),
        output::arg("<command>"),
        output::arg("[args]")
    );
    println!();
    println!("{}", output::section_header("Commands:"));
    println!("  {} {}   Move items 1..=N through a bounded queue and verify", output::command("run"), output::arg("[options]"));
    println!("  {}             Show this help", output::command("help"));
    println!("  {}          Show version", output::command("version"));
    println!();
    println!("Use {} for options.", "handoff run --help".cyan());
}

pub fn print_run_help() {
    println!("{}", output::section_header("Run"));
    println!();
    println!("Start one producer and one consumer thread around a bounded queue.");
    println!("The producer sends 1..=N followed by an end-of-stream marker; the");
    println!("consumer collects until the marker. Prints source, destination and");
    println!("whether they match.");
    println!();
    println!("{}: {} {} {}", output::section_header("Usage"),
        output::command("handoff"),
        output::command("run"),
        output::arg("[--capacity <C>] [--count <N>]"));
    println!();
    println!("{}", output::section_header("Options:"));
    println!("  {} {}  Queue capacity, at least 1 (default: $HANDOFF_CAPACITY or 3)", output::arg("--capacity"), output::arg("<C>"));
    println!("  {} {}     Number of items to send (default: 10)", output::arg("--count"), output::arg("<N>"));
    println!();
    println!("{}", output::section_header("Environment:"));
    println!("  {}  Default queue capacity", output::arg("HANDOFF_CAPACITY"));
    println!("  {}          Log filter, e.g. handoff_rt=debug", output::arg("RUST_LOG"));
}
