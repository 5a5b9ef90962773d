// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Timing configuration
//!
//! Two knobs matter to callers:
//! - whether timing is enabled at all (a disabled root makes every call a no-op)
//! - how many children a node prints before it truncates
//!
//! The child limit used by [`TimerNode::render_default`] and `Display` is
//! process-wide state; [`TimingConfig::apply`] installs it.
//!
//! ## Example
//!
//! ```rust
//! use timing_tree::{OptionalTimer, TimingConfig};
//!
//! let config = TimingConfig {
//!     child_limit: 10,
//!     ..Default::default()
//! };
//! let mut root = config.start("request");
//! root.start_child("parse").end();
//! root.end();
//! assert!(root.render(config.child_limit).is_some());
//! ```

use std::sync::atomic::{AtomicIsize, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{TimingError, TimingResult};
use crate::node::TimerNode;

/// Child limit used when no other limit has been configured
pub const DEFAULT_CHILD_LIMIT: isize = 50;

/// Environment variable toggling timing on or off
pub const ENABLED_ENV: &str = "TIMING_TREE_ENABLED";

/// Environment variable overriding the child limit
pub const CHILD_LIMIT_ENV: &str = "TIMING_TREE_CHILD_LIMIT";

static CHILD_LIMIT: AtomicIsize = AtomicIsize::new(DEFAULT_CHILD_LIMIT);

/// Child limit consulted by renders that don't pass one explicitly
pub fn default_child_limit() -> isize {
    CHILD_LIMIT.load(Ordering::Relaxed)
}

/// Replace the process-wide child limit
///
/// Negative means "never truncate", zero means "print no children".
pub fn set_default_child_limit(limit: isize) {
    CHILD_LIMIT.store(limit, Ordering::Relaxed);
}

/// Timing settings, embeddable in a host application's config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// When false, [`TimingConfig::start`] hands out the disabled sentinel
    pub enabled: bool,

    /// Children printed per node before truncating
    pub child_limit: isize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            child_limit: DEFAULT_CHILD_LIMIT,
        }
    }
}

impl TimingConfig {
    /// Read overrides from `TIMING_TREE_ENABLED` and `TIMING_TREE_CHILD_LIMIT`
    ///
    /// Unset variables keep their defaults; malformed ones are an error.
    pub fn from_env() -> TimingResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`TimingConfig::from_env`], but logs and falls back to defaults
    /// when a variable is malformed
    pub fn from_env_or_default() -> Self {
        match Self::from_env() {
            Ok(config) => config,
            Err(err) => {
                warn!("Ignoring timing overrides from environment: {}", err);
                Self::default()
            }
        }
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TimingResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENABLED_ENV) {
            config.enabled = parse_flag(ENABLED_ENV, &raw)?;
        }

        if let Some(raw) = lookup(CHILD_LIMIT_ENV) {
            config.child_limit = raw.trim().parse().map_err(|_| {
                TimingError::InvalidConfig(format!(
                    "{} must be an integer, got '{}'",
                    CHILD_LIMIT_ENV, raw
                ))
            })?;
        }

        Ok(config)
    }

    /// Install this config's child limit as the process-wide default
    pub fn apply(&self) {
        debug!(
            "Applying timing config: enabled={}, child_limit={}",
            self.enabled, self.child_limit
        );
        set_default_child_limit(self.child_limit);
    }

    /// Start a root timer, or the disabled sentinel when timing is off
    pub fn start(&self, name: impl Into<String>) -> Option<TimerNode> {
        TimerNode::start_enabled(name, self.enabled)
    }
}

fn parse_flag(key: &str, raw: &str) -> TimingResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(TimingError::InvalidConfig(format!(
            "{} must be a boolean, got '{}'",
            key, raw
        ))),
    }
}
