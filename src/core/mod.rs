//! Core module - the conversation data model and aggregation engine

mod conversation;
mod emoji;
mod filter;
mod identity;
mod types;

pub(crate) use conversation::{Conversation, FrequencyTable, Timeline};
pub(crate) use emoji::{GlyphClassifier, UnicodeClassifier};
pub(crate) use filter::filter_since;
pub(crate) use identity::Identity;
pub(crate) use types::{RawExport, RawMessage};
