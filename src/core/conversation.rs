//! Conversation aggregation
//!
//! A `Conversation` normalizes the raw participant and message lists once and
//! computes every count table eagerly at construction. There is no mutating
//! API afterwards, so the cached tables always describe the message sequence
//! they were built from. Time-window filtering belongs before construction
//! (see `core::filter`).
//!
//! The message sequence is assumed to be time-ordered; the span is read from
//! the first and last message in source order and is not re-validated.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use std::collections::BTreeMap;

use crate::core::emoji::GlyphClassifier;
use crate::core::identity::Identity;
use crate::core::types::{Message, RawMessage, TEXT_TYPE};
use crate::error::AppError;
use crate::utils::Timezone;

/// Per-participant glyph frequency table. Both levels are `BTreeMap` so
/// iteration order is fixed: participants in `Identity` order, tags
/// lexicographically.
pub(crate) type FrequencyTable = BTreeMap<Identity, BTreeMap<String, u64>>;

/// The three time-bucketed histograms. Hour and weekday vectors are fixed
/// length; the day vector has one bucket per day of the span, offset from its
/// start.
#[derive(Debug, Clone)]
pub(crate) struct Timeline {
    pub(crate) hours: BTreeMap<Identity, [u64; 24]>,
    pub(crate) weekdays: BTreeMap<Identity, [u64; 7]>,
    pub(crate) days: BTreeMap<Identity, Vec<u64>>,
}

#[derive(Debug)]
pub(crate) struct Conversation {
    participants: Vec<Identity>,
    messages: Vec<Message>,
    message_counts: BTreeMap<Identity, u64>,
    word_counts: BTreeMap<Identity, u64>,
    emoji_counts: FrequencyTable,
    reaction_counts: FrequencyTable,
}

impl Conversation {
    /// Normalize the raw payload and compute all aggregates. Any malformed
    /// record aborts construction; partial data would corrupt every table.
    pub(crate) fn new(
        raw_participants: &[String],
        raw_messages: Vec<RawMessage>,
        timezone: Timezone,
        classifier: &dyn GlyphClassifier,
    ) -> Result<Self, AppError> {
        let participants = raw_participants
            .iter()
            .map(|name| Identity::new(name))
            .collect::<Result<Vec<_>, _>>()?;

        let messages = raw_messages
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Message::from_raw(raw, index, timezone))
            .collect::<Result<Vec<_>, _>>()?;

        let mut message_counts: BTreeMap<Identity, u64> = BTreeMap::new();
        let mut word_counts: BTreeMap<Identity, u64> = BTreeMap::new();
        let mut emoji_counts: FrequencyTable = BTreeMap::new();
        let mut reaction_counts: FrequencyTable = BTreeMap::new();

        for message in &messages {
            // Senders outside the participant list still accumulate.
            *message_counts.entry(message.sender.clone()).or_default() += 1;

            if message.kind == TEXT_TYPE {
                let words = message.text.split_whitespace().count() as u64;
                *word_counts.entry(message.sender.clone()).or_default() += words;
            }

            for tag in classifier.extract(&message.text) {
                *emoji_counts
                    .entry(message.sender.clone())
                    .or_default()
                    .entry(tag)
                    .or_default() += 1;
            }

            for reaction in &message.reactions {
                *reaction_counts
                    .entry(reaction.actor.clone())
                    .or_default()
                    .entry(classifier.classify(&reaction.glyph))
                    .or_default() += 1;
            }
        }

        Ok(Conversation {
            participants,
            messages,
            message_counts,
            word_counts,
            emoji_counts,
            reaction_counts,
        })
    }

    pub(crate) fn participants(&self) -> &[Identity] {
        &self.participants
    }

    pub(crate) fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub(crate) fn message_counts(&self) -> &BTreeMap<Identity, u64> {
        &self.message_counts
    }

    pub(crate) fn word_counts(&self) -> &BTreeMap<Identity, u64> {
        &self.word_counts
    }

    pub(crate) fn emoji_counts(&self) -> &FrequencyTable {
        &self.emoji_counts
    }

    pub(crate) fn reaction_counts(&self) -> &FrequencyTable {
        &self.reaction_counts
    }

    pub(crate) fn total_messages(&self) -> u64 {
        self.message_counts.values().sum()
    }

    pub(crate) fn total_words(&self) -> u64 {
        self.word_counts.values().sum()
    }

    /// First and last message timestamps in source order, not sorted.
    pub(crate) fn time_span(
        &self,
    ) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), AppError> {
        match (self.messages.first(), self.messages.last()) {
            (Some(first), Some(last)) => Ok((first.time_stamp, last.time_stamp)),
            _ => Err(AppError::EmptyConversation),
        }
    }

    /// Day count of the span, inclusive: floor((end - start) in days) + 1.
    /// Duration-based, not calendar-based, so a span of 25 hours is 2 days
    /// no matter how many calendar dates it touches.
    pub(crate) fn num_days(&self) -> Result<i64, AppError> {
        let (start, end) = self.time_span()?;
        if end < start {
            return Err(AppError::NegativeSpan);
        }
        Ok((end - start).num_days() + 1)
    }

    pub(crate) fn average_message_length(&self) -> Result<f64, AppError> {
        let messages = self.total_messages();
        if messages == 0 {
            return Err(AppError::EmptyConversation);
        }
        Ok(round2(self.total_words() as f64 / messages as f64))
    }

    pub(crate) fn average_messages_per_day(&self) -> Result<f64, AppError> {
        let days = self.num_days()?;
        Ok(round2(self.total_messages() as f64 / days as f64))
    }

    /// Bucket every message by hour of day, weekday (Monday = 0), and day
    /// offset from the span start. Listed participants always get zero
    /// vectors; unlisted senders get theirs on first message.
    pub(crate) fn timeline(&self) -> Result<Timeline, AppError> {
        let (start, _) = self.time_span()?;
        let num_days = self.num_days()? as usize;

        let mut hours: BTreeMap<Identity, [u64; 24]> = self
            .participants
            .iter()
            .map(|p| (p.clone(), [0; 24]))
            .collect();
        let mut weekdays: BTreeMap<Identity, [u64; 7]> = self
            .participants
            .iter()
            .map(|p| (p.clone(), [0; 7]))
            .collect();
        let mut days: BTreeMap<Identity, Vec<u64>> = self
            .participants
            .iter()
            .map(|p| (p.clone(), vec![0; num_days]))
            .collect();

        for message in &self.messages {
            let ts = message.time_stamp;
            let hour = ts.hour() as usize;
            let weekday = ts.weekday().num_days_from_monday() as usize;
            // In bounds as long as the sequence is time-ordered, which makes
            // start/end true extremes.
            let day = (ts - start).num_days() as usize;

            let sender = &message.sender;
            hours.entry(sender.clone()).or_insert([0; 24])[hour] += 1;
            weekdays.entry(sender.clone()).or_insert([0; 7])[weekday] += 1;
            days.entry(sender.clone()).or_insert_with(|| vec![0; num_days])[day] += 1;
        }

        Ok(Timeline {
            hours,
            weekdays,
            days,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
