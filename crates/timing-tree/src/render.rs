// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Text rendering
//!
//! An ended tree renders depth-first, one node per line, indented with one tab
//! per level:
//!
//! ```text
//! request: 2.41ms
//! 	** 50 children truncated **
//! 	row 0: 12.3µs
//! 	...
//! 	row 73: 1.1ms
//! ```
//!
//! Durations use the standard `Debug` form of [`Duration`], which picks the
//! unit (ns, µs, ms, s) from the magnitude. Downstream log consumers match on
//! this layout, so the marker wording and placement must stay as they are.
//!
//! ## Truncation
//!
//! With a positive limit `N` and more than `N` children, the first `N`
//! children are printed, except that the slowest child always makes it in: if
//! it sits past the window it takes the last slot. A negative limit prints
//! everything and a zero limit prints no children.

use std::fmt;
use std::time::Duration;

use tracing::info;

use crate::config::default_child_limit;
use crate::error::{TimingError, TimingResult};
use crate::node::{TimerNode, contract_violation};

impl TimerNode {
    /// Render this tree, printing at most `child_limit` children per node
    ///
    /// # Panics
    ///
    /// Panics if this node is still running.
    pub fn render(&self, child_limit: isize) -> String {
        match self.try_render(child_limit) {
            Ok(text) => text,
            Err(err) => contract_violation(err),
        }
    }

    /// Render with the process-wide default child limit
    pub fn render_default(&self) -> String {
        self.render(default_child_limit())
    }

    /// Checked form of [`TimerNode::render`]
    pub fn try_render(&self, child_limit: isize) -> TimingResult<String> {
        if !self.is_ended() {
            return Err(TimingError::NotEnded {
                name: self.name().to_string(),
            });
        }

        let mut out = String::new();
        self.write_tree(&mut out, 0, child_limit);
        Ok(out)
    }

    /// Emit the rendered tree as one `info` event on the `timing_tree` target
    ///
    /// # Panics
    ///
    /// Panics if this node is still running.
    pub fn log_tree(&self, child_limit: isize) {
        let tree = self.render(child_limit);
        info!(
            target: "timing_tree",
            root = %self.name(),
            total = ?self.duration(),
            "\n{}",
            tree
        );
    }

    fn write_tree(&self, out: &mut String, nesting: usize, child_limit: isize) {
        indent(out, nesting);
        out.push_str(&format!("{}: {:?}", self.name(), self.duration()));

        let (visible, truncated) = select_children(self.children(), child_limit);
        if truncated > 0 {
            out.push('\n');
            indent(out, nesting + 1);
            out.push_str(&format!("** {} children truncated **", truncated));
        }

        for child in visible {
            out.push('\n');
            child.write_tree(out, nesting + 1, child_limit);
        }
    }
}

impl fmt::Display for TimerNode {
    /// Renders with the process-wide default child limit; panics on a live node
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_default())
    }
}

fn indent(out: &mut String, nesting: usize) {
    out.extend(std::iter::repeat_n('\t', nesting));
}

/// Children to print under `child_limit`, and how many were left out
fn select_children(children: &[TimerNode], child_limit: isize) -> (Vec<&TimerNode>, usize) {
    if child_limit == 0 || children.is_empty() {
        return (Vec::new(), 0);
    }

    let limit = match usize::try_from(child_limit) {
        Ok(limit) if limit < children.len() => limit,
        // negative, or everything fits
        _ => return (children.iter().collect(), 0),
    };

    let mut visible: Vec<&TimerNode> = children[..limit].iter().collect();
    if let Some(slowest) = slowest_index(children)
        && slowest >= limit
    {
        visible[limit - 1] = &children[slowest];
    }
    (visible, children.len() - limit)
}

/// Index of the longest child; ties go to the earliest one
fn slowest_index(children: &[TimerNode]) -> Option<usize> {
    let mut slowest: Option<(usize, Duration)> = None;
    for (idx, child) in children.iter().enumerate() {
        let duration = child.duration();
        match slowest {
            Some((_, max)) if duration <= max => {}
            _ => slowest = Some((idx, duration)),
        }
    }
    slowest.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn ended_tree(children: usize, slow: Option<usize>) -> TimerNode {
        let mut root = TimerNode::start("root");
        for i in 0..children {
            let child = root.start_child(format!("child {}", i));
            if Some(i) == slow {
                sleep(Duration::from_millis(1));
            }
            child.end();
        }
        root.end();
        root
    }

    fn names<'a>(nodes: &[&'a TimerNode]) -> Vec<&'a str> {
        nodes.iter().map(|node| node.name()).collect()
    }

    #[test]
    fn test_select_all_when_under_limit() {
        let root = ended_tree(3, None);
        let (visible, truncated) = select_children(root.children(), 3);
        assert_eq!(names(&visible), ["child 0", "child 1", "child 2"]);
        assert_eq!(truncated, 0);
    }

    #[test]
    fn test_select_swaps_slowest_into_last_slot() {
        let root = ended_tree(10, Some(7));
        let (visible, truncated) = select_children(root.children(), 4);
        assert_eq!(names(&visible), ["child 0", "child 1", "child 2", "child 7"]);
        assert_eq!(truncated, 6);
    }

    #[test]
    fn test_select_keeps_window_when_slowest_visible() {
        let root = ended_tree(10, Some(1));
        let (visible, truncated) = select_children(root.children(), 4);
        assert_eq!(names(&visible), ["child 0", "child 1", "child 2", "child 3"]);
        assert_eq!(truncated, 6);
    }

    #[test]
    fn test_select_limit_one() {
        let root = ended_tree(5, Some(4));
        let (visible, truncated) = select_children(root.children(), 1);
        assert_eq!(names(&visible), ["child 4"]);
        assert_eq!(truncated, 4);
    }

    #[test]
    fn test_slowest_index_prefers_longest() {
        let mut root = TimerNode::start("root");
        for i in 0..3 {
            root.start_child(format!("child {}", i));
        }
        // every child ends with the parent, so the earliest started is longest
        root.end();
        assert_eq!(slowest_index(root.children()), Some(0));
        assert_eq!(slowest_index(&[]), None);
    }

    #[test]
    fn test_slowest_tie_goes_to_first() {
        let tied = Duration::from_millis(5);
        let children = vec![
            TimerNode::ended_with("child 0", Duration::from_millis(1)),
            TimerNode::ended_with("child 1", Duration::from_millis(1)),
            TimerNode::ended_with("child 2", tied),
            TimerNode::ended_with("child 3", Duration::from_millis(1)),
            TimerNode::ended_with("child 4", tied),
            TimerNode::ended_with("child 5", tied),
        ];
        assert_eq!(slowest_index(&children), Some(2));

        let (visible, truncated) = select_children(&children, 2);
        assert_eq!(names(&visible), ["child 0", "child 2"]);
        assert_eq!(truncated, 4);

        let root = TimerNode::ended_with("root", Duration::from_millis(20)).with_children(children);
        assert_eq!(
            root.render(2),
            "root: 20ms\n\t** 4 children truncated **\n\tchild 0: 1ms\n\tchild 2: 5ms"
        );
    }

    #[test]
    fn test_tie_inside_window_keeps_window() {
        let tied = Duration::from_millis(3);
        let children = vec![
            TimerNode::ended_with("child 0", tied),
            TimerNode::ended_with("child 1", Duration::from_millis(1)),
            TimerNode::ended_with("child 2", tied),
        ];
        let (visible, truncated) = select_children(&children, 2);
        assert_eq!(names(&visible), ["child 0", "child 1"]);
        assert_eq!(truncated, 1);
    }

    #[test]
    fn test_try_render_live_node() {
        let root = TimerNode::start("live");
        assert_eq!(
            root.try_render(-1),
            Err(TimingError::NotEnded {
                name: "live".to_string()
            })
        );
    }

    #[test]
    fn test_nested_indentation() {
        let mut root = TimerNode::start("a");
        root.start_child("b").start_child("c");
        root.end();

        let lines: Vec<String> = root
            .render(-1)
            .lines()
            .map(|line| line.split(':').next().unwrap_or_default().to_string())
            .collect();
        assert_eq!(lines, ["a", "\tb", "\t\tc"]);
    }
}
