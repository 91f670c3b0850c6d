// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `handoff run`: one producer, one consumer, verified transfer.

use std::process;

use handoff_rt::config::parse_capacity;
use handoff_rt::{Pipeline, PipelineConfig};

use crate::{help, output};

/// Items sent when `--count` is not given.
pub const DEFAULT_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Explicit `--capacity`; `None` defers to the environment.
    pub capacity: Option<usize>,
    pub count: usize,
    pub help: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            capacity: None,
            count: DEFAULT_COUNT,
            help: false,
        }
    }
}

pub fn parse_run_args(args: &[String]) -> Result<RunOptions, String> {
    let mut opts = RunOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--capacity" | "-c" => {
                let value = iter.next().ok_or("--capacity requires a value")?;
                let capacity = parse_capacity("--capacity", value).map_err(|e| e.to_string())?;
                opts.capacity = Some(capacity);
            }
            "--count" | "-n" => {
                let value = iter.next().ok_or("--count requires a value")?;
                opts.count = value
                    .parse()
                    .map_err(|_| format!("--count: expected a non-negative integer, got `{}`", value))?;
            }
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown option: {}", other)),
        }
    }
    Ok(opts)
}

pub fn cmd_run(args: &[String]) {
    let opts = match parse_run_args(args) {
        Ok(opts) => opts,
        Err(msg) => fail(&msg),
    };
    if opts.help {
        help::print_run_help();
        return;
    }

    let config = match opts.capacity {
        Some(capacity) => PipelineConfig::new(capacity),
        None => PipelineConfig::from_env().unwrap_or_else(|e| fail(&e.to_string())),
    };

    // Capacity is checked here, before either thread exists.
    let pipeline = Pipeline::new(&config).unwrap_or_else(|e| fail(&e.to_string()));

    let source: Vec<u64> = (1..=opts.count as u64).collect();
    let outcome = pipeline.run(source).unwrap_or_else(|e| fail(&e.to_string()));

    println!("{}      {:?}", output::field_label("Source data:"), outcome.source);
    println!("{} {:?}", output::field_label("Destination data:"), outcome.destination);
    println!(
        "{} {}",
        output::field_label("Transfer successful:"),
        output::verdict(outcome.success)
    );

    if outcome.success {
        println!("\n{}", output::banner_ok("Transfer"));
    } else {
        eprintln!("\n{}", output::banner_fail("Transfer"));
        process::exit(1);
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("{}: {}", output::error_label(), msg);
    process::exit(1);
}
