// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Disabled timers
//!
//! Timing can be switched off by starting the root as `None` (see
//! [`TimerNode::start_enabled`]). [`OptionalTimer`] gives `Option<TimerNode>`
//! and `Option<&mut TimerNode>` the node operations, so call sites never
//! branch on whether timing is on:
//!
//! ```rust
//! use timing_tree::{OptionalTimer, TimerNode};
//!
//! fn handle(timer: Option<&mut TimerNode>) {
//!     let mut timer = timer;
//!     let mut lookup = timer.start_child("lookup");
//!     lookup.start_child("cache").end();
//!     lookup.end();
//! }
//!
//! let mut root = TimerNode::start_enabled("request", false);
//! handle(root.as_mut());
//! root.end();
//! assert!(root.render(-1).is_none());
//! ```

use std::time::Duration;

use crate::node::TimerNode;

/// Node operations that also work on the disabled sentinel (`None`)
///
/// On `None`: `start_child` returns `None`, `end` does nothing, `duration` is
/// zero and nothing is rendered or logged. On `Some` every call forwards to
/// the node, panics included.
pub trait OptionalTimer {
    fn start_child(&mut self, name: impl Into<String>) -> Option<&mut TimerNode>;

    fn end(&mut self);

    fn duration(&self) -> Duration;

    fn render(&self, child_limit: isize) -> Option<String>;

    fn log_tree(&self, child_limit: isize);
}

impl OptionalTimer for Option<TimerNode> {
    fn start_child(&mut self, name: impl Into<String>) -> Option<&mut TimerNode> {
        self.as_mut().map(|node| node.start_child(name))
    }

    fn end(&mut self) {
        if let Some(node) = self {
            node.end();
        }
    }

    fn duration(&self) -> Duration {
        self.as_ref().map_or(Duration::ZERO, TimerNode::duration)
    }

    fn render(&self, child_limit: isize) -> Option<String> {
        self.as_ref().map(|node| node.render(child_limit))
    }

    fn log_tree(&self, child_limit: isize) {
        if let Some(node) = self {
            node.log_tree(child_limit);
        }
    }
}

impl OptionalTimer for Option<&mut TimerNode> {
    fn start_child(&mut self, name: impl Into<String>) -> Option<&mut TimerNode> {
        self.as_deref_mut().map(|node| node.start_child(name))
    }

    fn end(&mut self) {
        if let Some(node) = self {
            node.end();
        }
    }

    fn duration(&self) -> Duration {
        self.as_deref().map_or(Duration::ZERO, TimerNode::duration)
    }

    fn render(&self, child_limit: isize) -> Option<String> {
        self.as_deref().map(|node| node.render(child_limit))
    }

    fn log_tree(&self, child_limit: isize) {
        if let Some(node) = self {
            node.log_tree(child_limit);
        }
    }
}
