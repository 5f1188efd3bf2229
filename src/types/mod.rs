use serde::{Deserialize, Serialize};

use crate::markup;

pub type CompactString = Box<str>;

pub fn compact_string(s: &str) -> CompactString {
    s.into()
}

/// Relative link into the generated reference, `page[#fragment]`.
///
/// Fragments are generator-assigned hashes; only the page/fragment split is
/// meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Anchor(CompactString);

impl Anchor {
    pub fn new(value: &str) -> Self {
        Self(compact_string(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The page part of the anchor (everything before `#`).
    pub fn page(&self) -> &str {
        match self.0.split_once('#') {
            Some((page, _)) => page,
            None => &self.0,
        }
    }

    /// The in-page identifier, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.0.split_once('#').map(|(_, fragment)| fragment)
    }

    /// True when the anchor points at a whole page rather than a member on it.
    pub fn is_page(&self) -> bool {
        self.fragment().is_none()
    }

    /// Join the anchor onto a documentation base URL.
    ///
    /// Anchors are written relative to the `search/` directory, so a leading
    /// `../` is dropped before joining.
    pub fn resolve(&self, base_url: &str) -> String {
        if base_url.is_empty() {
            return self.0.to_string();
        }
        let relative = self.0.strip_prefix("../").unwrap_or(&self.0);
        format!("{}/{relative}", base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an occurrence points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceKind {
    /// The page of the symbol itself (class or struct definition).
    Definition,
    /// A member, overload or declaration on some page.
    Member,
}

/// One documentation location for a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub anchor: Anchor,

    /// Link-target marker written by the generator between anchor and
    /// description. `None` when the entry used the two-element form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_target: Option<u32>,

    /// Qualified name as written in the table, entities included.
    pub description: String,
}

impl Occurrence {
    pub fn new(anchor: &str, description: impl Into<String>) -> Self {
        Self {
            anchor: Anchor::new(anchor),
            link_target: None,
            description: description.into(),
        }
    }

    pub fn with_link_target(mut self, target: u32) -> Self {
        self.link_target = Some(target);
        self
    }

    pub fn kind(&self) -> OccurrenceKind {
        if self.anchor.is_page() {
            OccurrenceKind::Definition
        } else {
            OccurrenceKind::Member
        }
    }

    pub fn is_definition(&self) -> bool {
        self.kind() == OccurrenceKind::Definition
    }

    /// Description with entities decoded, for terminal display.
    pub fn display_description(&self) -> std::borrow::Cow<'_, str> {
        markup::unescape_entities(&self.description)
    }
}

/// A single row of the search table: key, label and where the symbol lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub key: String,
    pub label: String,
    pub occurrences: Vec<Occurrence>,
}

impl SearchRecord {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            occurrences: Vec::new(),
        }
    }

    pub fn with_occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrences.push(occurrence);
        self
    }

    /// The key decoded back into symbol text (`value_5ftype` -> `value_type`).
    pub fn decoded_key(&self) -> std::borrow::Cow<'_, str> {
        markup::decode_key(&self.key)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter().filter(|o| o.is_definition())
    }
}
