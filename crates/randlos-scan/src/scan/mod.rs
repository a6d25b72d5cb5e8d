// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan cleanup — border removal ahead of OCR.

pub mod border;

pub use border::{BorderRemoval, BorderRemover};
