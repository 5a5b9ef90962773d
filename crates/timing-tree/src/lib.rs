// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Timing Tree
//!
//! Nested, named timing spans for a single flow of control (one request, one
//! job), rendered as an indented duration breakdown once the work is done.
//!
//! ## Usage
//!
//! ```rust
//! use timing_tree::TimerNode;
//!
//! let mut root = TimerNode::start("handle request");
//!
//! let auth = root.start_child("authenticate");
//! auth.end();
//!
//! let query = root.start_child("query");
//! query.start_child("plan");
//! // "plan" is still running; ending its parent ends it too
//! query.end();
//!
//! root.end();
//! println!("{}", root.render(10));
//! ```
//!
//! which prints something like
//!
//! ```text
//! handle request: 41.2µs
//! 	authenticate: 2.1µs
//! 	query: 30.4µs
//! 		plan: 12.7µs
//! ```
//!
//! ## Disabling
//!
//! Start the root with [`TimerNode::start_enabled`] (or
//! [`TimingConfig::start`]) and drive it through [`OptionalTimer`]: when timing
//! is off every call is a no-op and nothing is rendered.
//!
//! ## Misuse
//!
//! Ending a node twice, starting a child on an ended node and rendering a live
//! node are bugs in the caller and panic. The `try_*` methods return a
//! [`TimingError`] instead.
//!
//! ## Threads
//!
//! A tree belongs to one flow of control. Nothing here locks; share a tree
//! across threads only behind your own synchronization.

pub mod config;
pub mod error;
pub mod node;
pub mod optional;
pub mod render;
pub mod scoped;

// Re-exports
pub use config::{
    CHILD_LIMIT_ENV, DEFAULT_CHILD_LIMIT, ENABLED_ENV, TimingConfig, default_child_limit,
    set_default_child_limit,
};
pub use error::{TimingError, TimingResult};
pub use node::TimerNode;
pub use optional::OptionalTimer;
pub use scoped::ScopedChild;
