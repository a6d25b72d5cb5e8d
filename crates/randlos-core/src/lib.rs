// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Randlos — Configuration and error definitions shared across all crates.

pub mod config;
pub mod error;

pub use config::BorderConfig;
pub use error::{RandlosError, Result};
