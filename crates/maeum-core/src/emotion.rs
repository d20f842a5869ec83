//! Emotion vocabulary and the native-label translation table.

use std::collections::HashMap;
use std::fmt;

/// The application's six-category emotion vocabulary.
///
/// `Display` renders the Korean UI label. Labels the translation table
/// does not recognize are carried through unchanged as [`Emotion::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emotion {
    Anger,
    Joy,
    Anxiety,
    Embarrassment,
    Hurt,
    Sadness,
    /// A native label outside the fixed vocabulary, unchanged.
    Other(String),
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Emotion::Anger => "분노",
            Emotion::Joy => "기쁨",
            Emotion::Anxiety => "불안",
            Emotion::Embarrassment => "당황",
            Emotion::Hurt => "상처",
            Emotion::Sadness => "슬픔",
            Emotion::Other(native) => native,
        };
        f.write_str(label)
    }
}

/// Translation table from a classifier's native label vocabulary to
/// [`Emotion`] categories.
///
/// Injected into the pipeline at construction; [`Default`] carries the
/// fixed product table. Lookups never fail – unknown labels pass through
/// unchanged per the mapper contract.
#[derive(Debug, Clone)]
pub struct LabelMap {
    table: HashMap<String, Emotion>,
}

impl Default for LabelMap {
    fn default() -> Self {
        let table = [
            ("angry", Emotion::Anger),
            ("happy", Emotion::Joy),
            ("anxious", Emotion::Anxiety),
            ("embarrassed", Emotion::Embarrassment),
            ("hurt", Emotion::Hurt),
            ("sad", Emotion::Sadness),
        ]
        .into_iter()
        .map(|(native, emotion)| (native.to_owned(), emotion))
        .collect();
        Self { table }
    }
}

impl LabelMap {
    /// Empty table; every label passes through unchanged.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Add or replace one native-label entry.
    pub fn with_entry(mut self, native: impl Into<String>, emotion: Emotion) -> Self {
        self.table.insert(native.into(), emotion);
        self
    }

    /// Translate one native label; unknown labels map to themselves.
    pub fn map(&self, native: &str) -> Emotion {
        self.table
            .get(native)
            .cloned()
            .unwrap_or_else(|| Emotion::Other(native.to_owned()))
    }
}

/// Highest-confidence classification for one input text, after label
/// mapping. Derived fresh per turn; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionPrediction {
    pub emotion: Emotion,
    /// Softmax probability in `[0, 1]`.
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_table_maps_to_documented_labels() {
        let map = LabelMap::default();
        let cases = [
            ("angry", Emotion::Anger, "분노"),
            ("happy", Emotion::Joy, "기쁨"),
            ("anxious", Emotion::Anxiety, "불안"),
            ("embarrassed", Emotion::Embarrassment, "당황"),
            ("hurt", Emotion::Hurt, "상처"),
            ("sad", Emotion::Sadness, "슬픔"),
        ];
        for (native, emotion, display) in cases {
            let mapped = map.map(native);
            assert_eq!(mapped, emotion, "native label {native:?}");
            assert_eq!(mapped.to_string(), display, "native label {native:?}");
        }
    }

    #[test]
    fn unknown_labels_pass_through_unchanged() {
        let map = LabelMap::default();
        assert_eq!(map.map("curious"), Emotion::Other("curious".to_owned()));
        assert_eq!(map.map("curious").to_string(), "curious");
    }

    #[test]
    fn custom_entries_override_and_extend() {
        let map = LabelMap::default().with_entry("furious", Emotion::Anger);
        assert_eq!(map.map("furious"), Emotion::Anger);
        assert_eq!(map.map("sad"), Emotion::Sadness);
    }

    #[test]
    fn empty_table_passes_everything_through() {
        let map = LabelMap::empty();
        assert_eq!(map.map("sad"), Emotion::Other("sad".to_owned()));
    }
}
