// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Randlos.
//
// The border transform itself never fails; these errors cover everything
// around it (decoding, encoding, configuration files).

use thiserror::Error;

/// Top-level error type for all Randlos operations.
#[derive(Debug, Error)]
pub enum RandlosError {
    // -- Image errors --
    #[error("image processing failed: {0}")]
    Image(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RandlosError>;
