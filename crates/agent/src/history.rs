//! Conversation history bounding.
//!
//! The last `recent_limit` turns are kept verbatim. Everything older is
//! flattened into one summary line so the prompt stays bounded without
//! silently dropping turns. The flattening is a fixed template, not a
//! model-generated summary.

use gamechat_core::message::{Conversation, Turn};

/// Turns kept verbatim by default.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// A conversation split into a flattened prefix and a verbatim tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedHistory<'a> {
    /// Empty when nothing was folded.
    pub summary: String,
    /// At most `recent_limit` turns, oldest first.
    pub recent: &'a [Turn],
}

/// Split `conversation` into a summary of older turns and the recent window.
pub fn bound(conversation: &Conversation, recent_limit: usize) -> BoundedHistory<'_> {
    let turns = conversation.turns();
    let split = turns.len().saturating_sub(recent_limit);
    let (older, recent) = turns.split_at(split);

    let summary = older
        .iter()
        .map(|t| format!("{} asked about {}.", t.user, t.assistant))
        .collect::<Vec<_>>()
        .join(" ");

    BoundedHistory { summary, recent }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(n: usize) -> Conversation {
        (0..n)
            .map(|i| Turn::new(format!("q{i}"), format!("a{i}")))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn empty_conversation() {
        let conv = Conversation::new();
        let bounded = bound(&conv, 10);
        assert_eq!(bounded.summary, "");
        assert!(bounded.recent.is_empty());
    }

    #[test]
    fn window_size_is_min_of_length_and_limit() {
        for n in 0..8 {
            for k in 1..6 {
                let conv = conversation(n);
                let bounded = bound(&conv, k);
                assert_eq!(bounded.recent.len(), n.min(k), "n={n} k={k}");
                assert_eq!(bounded.summary.is_empty(), n <= k, "n={n} k={k}");
            }
        }
    }

    #[test]
    fn recent_window_keeps_order() {
        let conv = conversation(5);
        let bounded = bound(&conv, 2);
        assert_eq!(bounded.recent[0].user, "q3");
        assert_eq!(bounded.recent[1].user, "q4");
    }

    #[test]
    fn older_turns_are_flattened_with_template() {
        let conv = conversation(4);
        let bounded = bound(&conv, 2);
        assert_eq!(bounded.summary, "q0 asked about a0. q1 asked about a1.");
    }

    #[test]
    fn exactly_at_limit_has_no_summary() {
        let conv = conversation(3);
        let bounded = bound(&conv, 3);
        assert!(bounded.summary.is_empty());
        assert_eq!(bounded.recent.len(), 3);
    }
}
