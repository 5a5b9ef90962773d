// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Timer nodes
//!
//! A [`TimerNode`] is one timed span. It owns its children, so a whole call
//! tree is a single value that can be rendered once the root has ended.
//!
//! ## Lifecycle
//!
//! A node is live from [`TimerNode::start`] (or [`TimerNode::start_child`])
//! until [`TimerNode::end`]. Ending a node also ends every child that is still
//! running, all at the same instant, so deferred or forgotten children still
//! get a sensible duration. After that the node is frozen: ending it again or
//! attaching new children panics.

use std::time::{Duration, Instant};

use tracing::error;

use crate::error::{TimingError, TimingResult};

/// One timed span and the spans nested under it
#[derive(Debug, Clone)]
pub struct TimerNode {
    name: String,
    children: Vec<TimerNode>,
    started_at: Instant,
    ended: bool,
    duration: Duration,
}

impl TimerNode {
    /// Start a new root timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            started_at: Instant::now(),
            ended: false,
            duration: Duration::ZERO,
        }
    }

    /// Start a root timer, or return the disabled sentinel (`None`)
    ///
    /// The sentinel supports the same operations through
    /// [`OptionalTimer`](crate::OptionalTimer), each one a no-op.
    pub fn start_enabled(name: impl Into<String>, enabled: bool) -> Option<Self> {
        enabled.then(|| Self::start(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in the order they were started
    pub fn children(&self) -> &[TimerNode] {
        &self.children
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Start a child timer and attach it to this node
    ///
    /// # Panics
    ///
    /// Panics if this node has already ended.
    pub fn start_child(&mut self, name: impl Into<String>) -> &mut TimerNode {
        match self.try_start_child(name) {
            Ok(child) => child,
            Err(err) => contract_violation(err),
        }
    }

    /// Checked form of [`TimerNode::start_child`]
    pub fn try_start_child(&mut self, name: impl Into<String>) -> TimingResult<&mut TimerNode> {
        let name = name.into();
        if self.ended {
            return Err(TimingError::ChildOfEnded {
                parent: self.name.clone(),
                child: name,
            });
        }

        self.children.push(TimerNode::start(name));
        let idx = self.children.len() - 1;
        Ok(&mut self.children[idx])
    }

    /// End this node and every child that is still running
    ///
    /// # Panics
    ///
    /// Panics if this node has already ended.
    pub fn end(&mut self) {
        if let Err(err) = self.try_end() {
            contract_violation(err);
        }
    }

    /// Checked form of [`TimerNode::end`]
    pub fn try_end(&mut self) -> TimingResult<()> {
        if self.ended {
            return Err(TimingError::AlreadyEnded {
                name: self.name.clone(),
            });
        }
        self.end_at(Instant::now());
        Ok(())
    }

    fn end_at(&mut self, now: Instant) {
        for child in self.children.iter_mut().filter(|child| !child.ended) {
            child.end_at(now);
        }
        self.ended = true;
        self.duration = now.saturating_duration_since(self.started_at);
    }

    /// An already-ended node with a fixed duration
    #[cfg(test)]
    pub(crate) fn ended_with(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            started_at: Instant::now(),
            ended: true,
            duration,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_children(mut self, children: Vec<TimerNode>) -> Self {
        self.children = children;
        self
    }

    /// Time spent in this span
    ///
    /// Frozen once the node has ended; before that it is the time elapsed so
    /// far and grows on every call.
    pub fn duration(&self) -> Duration {
        if self.ended {
            self.duration
        } else {
            self.started_at.elapsed()
        }
    }
}

/// Log a misuse of the API and abort the calling path
pub(crate) fn contract_violation(err: TimingError) -> ! {
    debug_assert!(err.is_contract_violation(), "not a misuse: {}", err);
    error!(target: "timing_tree", "Timing tree misuse: {}", err);
    panic!("{}", err)
}
