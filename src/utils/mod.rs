// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Utility modules
//!
//! Common utilities for the command-line tools.

pub mod colors;
pub mod logging;

pub use colors::*;
pub use logging::init_tracing;
