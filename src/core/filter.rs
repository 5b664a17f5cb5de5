//! Time-window preprocessing
//!
//! Filtering happens on raw records, before a `Conversation` is built, so the
//! aggregates computed at construction can never disagree with the message
//! sequence.

use chrono::{DateTime, FixedOffset};

use crate::core::types::RawMessage;

/// Keep only messages strictly after `cutoff`. Timestamps are compared at
/// whole-second precision, matching normalization. Records without a
/// timestamp are kept so normalization reports them instead of this step
/// silently discarding them.
pub(crate) fn filter_since(
    messages: Vec<RawMessage>,
    cutoff: DateTime<FixedOffset>,
) -> Vec<RawMessage> {
    let cutoff_secs = cutoff.timestamp();
    messages
        .into_iter()
        .filter(|m| match m.timestamp {
            Some(ms) => ms.div_euclid(1000) > cutoff_secs,
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn raw(ms: i64) -> RawMessage {
        RawMessage {
            sender_name: Some("Anna Svensson".to_string()),
            message_type: Some("text".to_string()),
            text: None,
            reactions: Vec::new(),
            timestamp: Some(ms),
            media: Vec::new(),
            is_unsent: false,
        }
    }

    fn cutoff(secs: i64) -> DateTime<FixedOffset> {
        Utc.timestamp_opt(secs, 0).unwrap().fixed_offset()
    }

    #[test]
    fn keeps_only_strictly_after() {
        let kept = filter_since(vec![raw(999_999), raw(1_000_000), raw(1_000_001)], cutoff(1_000));
        // 1_000_000 ms truncates to exactly 1_000 s: not strictly after.
        let stamps: Vec<_> = kept.iter().map(|m| m.timestamp.unwrap()).collect();
        assert_eq!(stamps, vec![1_000_001]);
    }

    #[test]
    fn idempotent_for_fixed_cutoff() {
        let messages = vec![raw(500_000), raw(1_500_000), raw(2_500_000)];
        let once = filter_since(messages.clone(), cutoff(1_000));
        let twice = filter_since(once.clone(), cutoff(1_000));
        let a: Vec<_> = once.iter().map(|m| m.timestamp).collect();
        let b: Vec<_> = twice.iter().map(|m| m.timestamp).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn retains_records_without_timestamp() {
        let mut bad = raw(0);
        bad.timestamp = None;
        let kept = filter_since(vec![bad], cutoff(1_000));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(filter_since(Vec::new(), cutoff(0)).is_empty());
    }
}
