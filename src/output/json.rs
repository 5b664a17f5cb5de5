use serde_json::{Value, json};
use std::collections::BTreeMap;

use crate::core::{Conversation, FrequencyTable, Identity};
use crate::error::AppError;

fn counts_json(counts: &BTreeMap<Identity, u64>) -> Value {
    let map: serde_json::Map<String, Value> = counts
        .iter()
        .map(|(participant, count)| (participant.full_name.clone(), json!(count)))
        .collect();
    Value::Object(map)
}

fn frequency_json(counts: &FrequencyTable) -> Value {
    let map: serde_json::Map<String, Value> = counts
        .iter()
        .map(|(participant, tags)| {
            let inner: serde_json::Map<String, Value> = tags
                .iter()
                .map(|(tag, count)| (tag.clone(), json!(count)))
                .collect();
            (participant.full_name.clone(), Value::Object(inner))
        })
        .collect();
    Value::Object(map)
}

fn histogram_json<T: AsRef<[u64]>>(histogram: &BTreeMap<Identity, T>) -> Value {
    let map: serde_json::Map<String, Value> = histogram
        .iter()
        .map(|(participant, buckets)| (participant.full_name.clone(), json!(buckets.as_ref())))
        .collect();
    Value::Object(map)
}

/// The full report as one JSON document. The document is only defined for a
/// non-empty conversation; averages on an empty one are undefined, not zero.
pub(crate) fn report_json(conversation: &Conversation) -> Result<Value, AppError> {
    let (start, end) = conversation.time_span()?;
    let timeline = conversation.timeline()?;

    Ok(json!({
        "participants": conversation
            .participants()
            .iter()
            .map(|p| p.full_name.clone())
            .collect::<Vec<_>>(),
        "totals": {
            "messages": conversation.total_messages(),
            "words": conversation.total_words(),
            "first_message": start.to_rfc3339(),
            "last_message": end.to_rfc3339(),
            "days": conversation.num_days()?,
            "average_message_length": conversation.average_message_length()?,
            "average_messages_per_day": conversation.average_messages_per_day()?,
        },
        "message_counts": counts_json(conversation.message_counts()),
        "word_counts": counts_json(conversation.word_counts()),
        "emoji_counts": frequency_json(conversation.emoji_counts()),
        "reaction_counts": frequency_json(conversation.reaction_counts()),
        "timeline": {
            "hours": histogram_json(&timeline.hours),
            "weekdays": histogram_json(&timeline.weekdays),
            "days": histogram_json(&timeline.days),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RawMessage, UnicodeClassifier};
    use crate::utils::Timezone;

    fn raw_text(sender: &str, text: &str, ms: i64) -> RawMessage {
        RawMessage {
            sender_name: Some(sender.to_string()),
            message_type: Some("text".to_string()),
            text: Some(text.to_string()),
            reactions: Vec::new(),
            timestamp: Some(ms),
            media: Vec::new(),
            is_unsent: false,
        }
    }

    fn sample() -> Conversation {
        let names = vec!["Anna Svensson".to_string(), "Bo Lund".to_string()];
        let messages = vec![
            raw_text("Anna Svensson", "hej du \u{1F600}", 1_000_000),
            raw_text("Bo Lund", "bra tack", 1_000_000 + 90_000_000),
        ];
        Conversation::new(
            &names,
            messages,
            Timezone::Named(chrono_tz::UTC),
            &UnicodeClassifier,
        )
        .unwrap()
    }

    #[test]
    fn report_carries_totals_and_counts() {
        let report = report_json(&sample()).unwrap();
        assert_eq!(report["totals"]["messages"], 2);
        assert_eq!(report["totals"]["words"], 5);
        assert_eq!(report["totals"]["days"], 2);
        assert_eq!(report["message_counts"]["Anna Svensson"], 1);
        assert_eq!(report["word_counts"]["Anna Svensson"], 3);
        assert_eq!(report["emoji_counts"]["Anna Svensson"]["grinning_face"], 1);
    }

    #[test]
    fn report_timeline_has_fixed_bucket_counts() {
        let report = report_json(&sample()).unwrap();
        let hours = report["timeline"]["hours"]["Bo Lund"].as_array().unwrap();
        assert_eq!(hours.len(), 24);
        let weekdays = report["timeline"]["weekdays"]["Bo Lund"].as_array().unwrap();
        assert_eq!(weekdays.len(), 7);
        let days = report["timeline"]["days"]["Bo Lund"].as_array().unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[1], 1);
    }

    #[test]
    fn report_errors_on_empty_conversation() {
        let names = vec!["Anna Svensson".to_string()];
        let conv = Conversation::new(
            &names,
            Vec::new(),
            Timezone::Named(chrono_tz::UTC),
            &UnicodeClassifier,
        )
        .unwrap();
        assert!(report_json(&conv).is_err());
    }
}
