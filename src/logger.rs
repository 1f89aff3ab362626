/*
 * This file is part of devprint.
 *
 * Copyright (C) 2025 devprint contributors
 *
 * devprint is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * devprint is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with devprint. If not, see <https://www.gnu.org/licenses/>.
 */

//! Logging setup for binaries embedding devprint
//!
//! The library only emits `tracing` events. Call [`init_logging`] once from a
//! binary to print them; `DEVPRINT_LOG` overrides the requested filter.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "DEVPRINT_LOG";

/// Filter used when neither the caller nor the environment supplies one
pub const DEFAULT_LEVEL: &str = "warn";

/// Resolve the effective filter directive
pub fn log_filter(requested: Option<&str>) -> String {
    match std::env::var(LOG_ENV) {
        Ok(level) if !level.trim().is_empty() => level,
        _ => requested.unwrap_or(DEFAULT_LEVEL).to_string(),
    }
}

/// Install a stderr fmt subscriber.
///
/// Fails if a global subscriber is already installed or the filter does not
/// parse.
pub fn init_logging(requested: Option<&str>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(log_filter(requested))
        .map_err(|e| anyhow!("invalid log filter: {}", e))?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn environment_overrides_requested_level() {
        std::env::set_var(LOG_ENV, "dp_core=debug");
        assert_eq!(log_filter(Some("info")), "dp_core=debug");
        std::env::remove_var(LOG_ENV);
    }

    #[test]
    #[serial]
    fn falls_back_to_default_level() {
        std::env::remove_var(LOG_ENV);
        assert_eq!(log_filter(None), "warn");
        assert_eq!(log_filter(Some("debug")), "debug");
    }

    #[test]
    #[serial]
    fn second_init_is_an_error_not_a_panic() {
        std::env::remove_var(LOG_ENV);
        let _ = init_logging(Some("warn"));
        assert!(init_logging(Some("warn")).is_err());
    }
}
