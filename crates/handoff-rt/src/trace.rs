// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Log output setup.
//!
//! Queue operations log at `trace`, blocking and end-of-stream at `debug`,
//! run start/finish at `info`. Filter with `RUST_LOG`, e.g.
//! `RUST_LOG=handoff_rt::queue=trace`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a stderr subscriber with thread names and an uptime clock.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_names(true)
                .with_timer(fmt::time::uptime()),
        )
        .with(filter)
        .try_init();
}
