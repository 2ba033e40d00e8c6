// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use ipmerge::{BlockGroups, FormatOptions};
use std::{
    env,
    io::{self, BufRead},
    process::ExitCode,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// JSON object with [FormatOptions] fields, f.ex. `{"always_prefix": true}`.
const FORMAT_ENV: &str = "IPMERGE_FORMAT";

/// Read CIDR blocks from stdin, one per line, and print the merged set.
///
/// Log verbosity follows `RUST_LOG` (default `warn`), logs go to stderr.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let opts: FormatOptions = match env::var(FORMAT_ENV) {
        Ok(json) => match FormatOptions::from_json(&json) {
            Ok(opts) => opts,
            Err(e) => {
                eprintln!("invalid {FORMAT_ENV}: {e}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => FormatOptions::default(),
    };
    debug!("format options: {opts:?}");

    let lines: Vec<String> = match io::stdin().lock().lines().collect() {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("failed to read input: {e}");
            return ExitCode::FAILURE;
        }
    };

    let groups: BlockGroups = match BlockGroups::from_lines(&lines) {
        Ok(groups) => groups,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let out: String = groups.merged().render(&opts);
    if !out.is_empty() {
        println!("{out}");
    }
    ExitCode::SUCCESS
}
