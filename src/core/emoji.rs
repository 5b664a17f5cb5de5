//! Emoji and reaction glyph canonicalization
//!
//! Glyphs are folded to a stable textual tag (the Unicode name, lowercased
//! and underscore-joined) so text emojis and reaction glyphs share one key
//! space. Classification is total: a reaction glyph that cannot be resolved
//! maps to the explicit `unknown` tag instead of being dropped.

use unicode_segmentation::UnicodeSegmentation;

/// Tag assigned to reaction glyphs the emoji table cannot resolve.
pub(crate) const UNKNOWN_TAG: &str = "unknown";

/// Canonicalization seam between raw glyphs and the aggregator's tag space.
pub(crate) trait GlyphClassifier {
    /// Map a reaction glyph (emoji or shortcode-like string) to a canonical
    /// tag. Total and deterministic.
    fn classify(&self, glyph: &str) -> String;

    /// Scan message text left to right and yield one tag per emoji
    /// occurrence, preserving order and multiplicity.
    fn extract(&self, text: &str) -> Vec<String>;
}

/// Classifier backed by the Unicode emoji table.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct UnicodeClassifier;

fn lookup(glyph: &str) -> Option<&'static emojis::Emoji> {
    if let Some(e) = emojis::get(glyph) {
        return Some(e);
    }
    // Exports are inconsistent about variation selectors; retry without
    // them, then with the fully-qualified form the table carries.
    let stripped: String = glyph
        .chars()
        .filter(|c| !matches!(c, '\u{fe0e}' | '\u{fe0f}'))
        .collect();
    if stripped != glyph
        && let Some(e) = emojis::get(&stripped)
    {
        return Some(e);
    }
    emojis::get(&format!("{stripped}\u{fe0f}"))
}

fn tag_for(emoji: &emojis::Emoji) -> String {
    let mut tag = String::with_capacity(emoji.name().len());
    for c in emoji.name().to_lowercase().chars() {
        if c.is_alphanumeric() {
            tag.push(c);
        } else if !tag.ends_with('_') {
            tag.push('_');
        }
    }
    tag.trim_matches('_').to_string()
}

impl GlyphClassifier for UnicodeClassifier {
    fn classify(&self, glyph: &str) -> String {
        let trimmed = glyph.trim();
        if let Some(emoji) = lookup(trimmed) {
            return tag_for(emoji);
        }
        if let Some(emoji) = emojis::get_by_shortcode(trimmed) {
            return tag_for(emoji);
        }
        UNKNOWN_TAG.to_string()
    }

    fn extract(&self, text: &str) -> Vec<String> {
        text.graphemes(true)
            .filter_map(lookup)
            .map(tag_for)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_thumbs_up_glyph() {
        let c = UnicodeClassifier;
        assert_eq!(c.classify("\u{1F44D}"), "thumbs_up");
    }

    #[test]
    fn classify_strips_variation_selector() {
        let c = UnicodeClassifier;
        // Red heart with and without VS-16 fold to the same tag.
        assert_eq!(c.classify("\u{2764}\u{FE0F}"), "red_heart");
        assert_eq!(c.classify("\u{2764}"), "red_heart");
    }

    #[test]
    fn classify_accepts_shortcodes() {
        let c = UnicodeClassifier;
        assert_eq!(c.classify("thumbsup"), "thumbs_up");
    }

    #[test]
    fn classify_unrecognized_maps_to_unknown() {
        let c = UnicodeClassifier;
        assert_eq!(c.classify("definitely-not-a-glyph"), UNKNOWN_TAG);
        assert_eq!(c.classify(""), UNKNOWN_TAG);
    }

    #[test]
    fn classify_is_deterministic() {
        let c = UnicodeClassifier;
        assert_eq!(c.classify("\u{1F600}"), c.classify("\u{1F600}"));
    }

    #[test]
    fn extract_preserves_order_and_multiplicity() {
        let c = UnicodeClassifier;
        let tags = c.extract("hej \u{1F600}\u{1F600} du \u{2764}\u{FE0F}");
        assert_eq!(tags, vec!["grinning_face", "grinning_face", "red_heart"]);
    }

    #[test]
    fn extract_skips_plain_text() {
        let c = UnicodeClassifier;
        assert!(c.extract("bara vanlig text").is_empty());
        assert!(c.extract("").is_empty());
    }

    #[test]
    fn tags_are_lowercase_identifiers() {
        let c = UnicodeClassifier;
        for tag in c.extract("\u{1F44D}\u{1F602}\u{1F389}") {
            assert!(!tag.is_empty());
            assert!(tag.chars().all(|ch| ch.is_alphanumeric() || ch == '_'));
            assert_eq!(tag, tag.to_lowercase());
        }
    }
}
