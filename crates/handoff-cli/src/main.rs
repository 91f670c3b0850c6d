// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! handoff CLI - runs the bounded producer/consumer transfer.

mod commands;
mod help;
mod output;

use std::env;
use std::process;

fn main() {
    output::init();
    handoff_rt::trace::init_tracing();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        help::print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => commands::run::cmd_run(&args[2..]),
        "help" | "--help" | "-h" => help::print_usage(),
        "version" | "--version" | "-V" => println!("handoff {}", help::VERSION),
        other => {
            eprintln!("{}: unknown command: {}", output::error_label(), other);
            help::print_usage();
            process::exit(1);
        }
    }
}
