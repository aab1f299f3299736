// ============================================================
// Layer 3 — TranslationRecord Domain Type
// ============================================================
// One raw row from a parallel corpus. The sentences live in a
// nested `translation` map keyed by language code:
//
//   {"id": "17", "translation": {"en": "Hello.", "it": "Ciao."}}
//
// The record is read-only input: the example builder borrows
// the two sentences it needs and never mutates the record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Optional row identifier carried through from the corpus
    #[serde(default)]
    pub id: Option<String>,

    /// Language code → sentence text
    pub translation: HashMap<String, String>,
}

impl TranslationRecord {
    /// Build a record from a list of (language, sentence) pairs.
    ///
    /// Example:
    ///   let r = TranslationRecord::from_pairs([("en", "Hi"), ("it", "Ciao")]);
    #[cfg(test)]
    pub fn from_pairs<L, T>(pairs: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        Self {
            id: None,
            translation: pairs
                .into_iter()
                .map(|(lang, text)| (lang.into(), text.into()))
                .collect(),
        }
    }

    /// Sentence for `lang`, if the record carries one
    pub fn text(&self, lang: &str) -> Option<&str> {
        self.translation.get(lang).map(String::as_str)
    }
}
