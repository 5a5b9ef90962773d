// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Scoped child timers
//!
//! # Example
//!
//! ```rust
//! use timing_tree::TimerNode;
//!
//! let mut root = TimerNode::start("request");
//! {
//!     let mut parse = root.scoped("parse");
//!     parse.start_child("tokenize").end();
//!     // ... parsing code ...
//! } // "parse" ends here
//! assert!(root.children()[0].is_ended());
//! root.end();
//! ```

use std::ops::{Deref, DerefMut};

use crate::node::TimerNode;

/// A child timer that ends itself when dropped
///
/// Ending it explicitly first is fine; the drop then leaves it alone.
#[derive(Debug)]
pub struct ScopedChild<'a> {
    node: &'a mut TimerNode,
}

impl TimerNode {
    /// Start a child that ends when the returned guard goes out of scope
    ///
    /// # Panics
    ///
    /// Panics if this node has already ended.
    pub fn scoped(&mut self, name: impl Into<String>) -> ScopedChild<'_> {
        ScopedChild {
            node: self.start_child(name),
        }
    }
}

impl Deref for ScopedChild<'_> {
    type Target = TimerNode;

    fn deref(&self) -> &TimerNode {
        self.node
    }
}

impl DerefMut for ScopedChild<'_> {
    fn deref_mut(&mut self) -> &mut TimerNode {
        self.node
    }
}

impl Drop for ScopedChild<'_> {
    fn drop(&mut self) {
        if !self.node.is_ended() {
            self.node.end();
        }
    }
}
