//! Raw export records and the typed entities they normalize into
//!
//! The loader hands over `RawExport` exactly as deserialized; everything the
//! format might omit is an `Option` here, and normalization decides what is
//! actually required. A missing sender, type, or timestamp aborts the whole
//! payload rather than silently defaulting.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::core::identity::Identity;
use crate::error::AppError;
use crate::utils::Timezone;

/// Message type tag that participates in word counting.
pub(crate) const TEXT_TYPE: &str = "text";

// ============================================================================
// Raw records (as found in the export files)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawExport {
    #[serde(default)]
    pub(crate) participants: Vec<String>,
    #[serde(default)]
    pub(crate) messages: Vec<RawMessage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawMessage {
    pub(crate) sender_name: Option<String>,
    #[serde(rename = "type")]
    pub(crate) message_type: Option<String>,
    pub(crate) text: Option<String>,
    #[serde(default)]
    pub(crate) reactions: Vec<RawReaction>,
    /// Epoch milliseconds.
    pub(crate) timestamp: Option<i64>,
    #[serde(default)]
    pub(crate) media: Vec<RawMedia>,
    #[serde(default)]
    pub(crate) is_unsent: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawReaction {
    pub(crate) actor: Option<String>,
    pub(crate) reaction: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawMedia {
    pub(crate) uri: Option<String>,
}

// ============================================================================
// Typed entities
// ============================================================================

/// One reaction left on a message. The glyph is carried verbatim;
/// canonicalization happens at aggregation time.
#[derive(Debug, Clone)]
pub(crate) struct Reaction {
    pub(crate) actor: Identity,
    pub(crate) glyph: String,
}

impl Reaction {
    pub(crate) fn from_raw(raw: RawReaction, index: usize) -> Result<Self, AppError> {
        let actor = raw.actor.ok_or(AppError::MissingField {
            index,
            field: "actor",
        })?;
        let glyph = raw.reaction.ok_or(AppError::MissingField {
            index,
            field: "reaction",
        })?;
        Ok(Reaction {
            actor: Identity::new(&actor)?,
            glyph,
        })
    }
}

/// Attachment reference. The export may list several; only the first one is
/// retained.
#[derive(Debug, Clone, Default)]
pub(crate) struct Media {
    pub(crate) uri: Option<String>,
}

impl Media {
    pub(crate) fn from_raw(raw: Vec<RawMedia>) -> Self {
        match raw.into_iter().next() {
            Some(first) => Media { uri: first.uri },
            None => Media::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Message {
    pub(crate) sender: Identity,
    pub(crate) kind: String,
    pub(crate) text: String,
    pub(crate) reactions: Vec<Reaction>,
    pub(crate) time_stamp: DateTime<FixedOffset>,
    pub(crate) media: Media,
    /// Reserved by the export format; carried but not aggregated.
    #[allow(dead_code)]
    pub(crate) is_unsent: bool,
}

impl Message {
    /// Normalize one raw record. `index` is the message's position in the
    /// payload, used only for error reporting.
    pub(crate) fn from_raw(
        raw: RawMessage,
        index: usize,
        timezone: Timezone,
    ) -> Result<Self, AppError> {
        let sender = raw.sender_name.ok_or(AppError::MissingField {
            index,
            field: "senderName",
        })?;
        let kind = raw.message_type.ok_or(AppError::MissingField {
            index,
            field: "type",
        })?;
        let millis = raw.timestamp.ok_or(AppError::MissingField {
            index,
            field: "timestamp",
        })?;

        // Truncate to whole seconds (floor, not rounded).
        let secs = millis.div_euclid(1000);
        let time_stamp = timezone
            .resolve_secs(secs)
            .ok_or(AppError::InvalidTimestamp {
                index,
                value: millis,
            })?;

        let reactions = raw
            .reactions
            .into_iter()
            .map(|r| Reaction::from_raw(r, index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Message {
            sender: Identity::new(&sender)?,
            kind,
            text: raw.text.unwrap_or_default(),
            reactions,
            time_stamp,
            media: Media::from_raw(raw.media),
            is_unsent: raw.is_unsent,
        })
    }
}
