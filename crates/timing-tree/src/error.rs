// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for timing trees
//!
//! Misusing a node (ending it twice, growing it after it ended, rendering it
//! while live) is a programming error. The panicking operations on
//! [`TimerNode`](crate::TimerNode) report it by panicking with the `Display`
//! text of these variants; the `try_*` operations hand the same value back.

use thiserror::Error;

/// Result type alias for timing tree operations
pub type TimingResult<T> = Result<T, TimingError>;

/// Errors that can occur while driving a timing tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimingError {
    /// `end` was called on a node that had already ended
    #[error("cannot end timer '{name}': it has already ended")]
    AlreadyEnded { name: String },

    /// `start_child` was called on a node that had already ended
    #[error("cannot start child '{child}' on timer '{parent}': it has already ended")]
    ChildOfEnded { parent: String, child: String },

    /// Rendering was requested for a node that is still running
    #[error("cannot render timer '{name}': it has not ended")]
    NotEnded { name: String },

    /// A configuration value could not be parsed
    #[error("Invalid timing configuration: {0}")]
    InvalidConfig(String),
}

impl TimingError {
    /// True for the misuse variants that the panicking API turns into a panic
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, TimingError::InvalidConfig(_))
    }
}
