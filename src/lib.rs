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

//! devprint - stable device identifiers from environment signals
//!
//! Samples hardware, locale, display and storage signals from the running
//! host and collapses them into a 32-character hex token. No identifier is
//! ever stored; the same machine yields the same token as long as its signals
//! do not change.
//!
//! The token is a heuristic, not a credential: it can collide and it can be
//! spoofed.

pub mod logger;

pub use dp_core::{
    device_identifier, DeviceIdentifier, FingerprintString, HostEnvironment, Signal,
    SignalCollector, SignalReading, SignalSnapshot,
};
pub use dp_error::{DevprintError, Result};
pub use dp_host::{HostSettings, NativeHost};

/// Identifier for this machine, as 32 lowercase hex characters. Never fails.
pub fn generate_device_uid() -> String {
    let host = NativeHost::new();
    generate_device_uid_with(&host)
}

/// Identifier computed from an arbitrary signal source
pub fn generate_device_uid_with(host: &dyn HostEnvironment) -> String {
    device_identifier(host).into_string()
}
