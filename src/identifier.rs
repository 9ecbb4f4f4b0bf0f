//! Batch lookup identifiers.

use serde::{Deserialize, Serialize};

/// Maximum identifiers the server accepts per collection request.
pub(crate) const COLLECTION_CHUNK: usize = 75;

/// One identifier in a collection lookup.
///
/// Built through the `by_*` constructors; each names exactly one of the
/// lookup shapes the collection endpoint accepts. Identifiers the server
/// cannot resolve come back verbatim in
/// [`ListResults::not_found`](crate::ListResults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub illustration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiverse_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtgo_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arena_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcgplayer_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collector_number: Option<String>,
}

impl CardIdentifier {
    /// Look up by Scryfall id.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Look up by oracle id.
    #[must_use]
    pub fn by_oracle_id(id: impl Into<String>) -> Self {
        Self {
            oracle_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Look up by illustration id.
    #[must_use]
    pub fn by_illustration_id(id: impl Into<String>) -> Self {
        Self {
            illustration_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Look up by Multiverse id.
    #[must_use]
    pub fn by_multiverse_id(id: u32) -> Self {
        Self {
            multiverse_id: Some(id),
            ..Self::default()
        }
    }

    /// Look up by MTGO id.
    #[must_use]
    pub fn by_mtgo_id(id: u32) -> Self {
        Self {
            mtgo_id: Some(id),
            ..Self::default()
        }
    }

    /// Look up by Arena id.
    #[must_use]
    pub fn by_arena_id(id: u32) -> Self {
        Self {
            arena_id: Some(id),
            ..Self::default()
        }
    }

    /// Look up by TCGplayer id.
    #[must_use]
    pub fn by_tcgplayer_id(id: u32) -> Self {
        Self {
            tcgplayer_id: Some(id),
            ..Self::default()
        }
    }

    /// Look up the newest printing of a card by name.
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Look up a card by name within one set.
    #[must_use]
    pub fn by_name_set(name: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            set: Some(set.into()),
            ..Self::default()
        }
    }

    /// Look up a card by set code and collector number.
    #[must_use]
    pub fn by_set(set: impl Into<String>, collector_number: impl Into<String>) -> Self {
        Self {
            set: Some(set.into()),
            collector_number: Some(collector_number.into()),
            ..Self::default()
        }
    }
}

/// Partition a batch into request bodies the server will accept.
pub(crate) fn chunk_bodies(identifiers: &[CardIdentifier]) -> Vec<serde_json::Value> {
    identifiers
        .chunks(COLLECTION_CHUNK)
        .map(|chunk| serde_json::json!({ "identifiers": chunk }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_one_lookup_shape() {
        let ident = CardIdentifier::by_multiverse_id(369_030);
        assert_eq!(
            serde_json::to_value(&ident).unwrap(),
            serde_json::json!({ "multiverse_id": 369_030 })
        );

        let ident = CardIdentifier::by_name_set("Lightning Bolt", "prm");
        assert_eq!(
            serde_json::to_value(&ident).unwrap(),
            serde_json::json!({ "name": "Lightning Bolt", "set": "prm" })
        );
    }

    #[test]
    fn chunking_respects_the_server_limit_and_input_order() {
        let identifiers: Vec<_> = (1..=80).map(CardIdentifier::by_multiverse_id).collect();
        let bodies = chunk_bodies(&identifiers);

        assert_eq!(bodies.len(), 2);
        let first = bodies[0]["identifiers"].as_array().unwrap();
        let second = bodies[1]["identifiers"].as_array().unwrap();
        assert_eq!(first.len(), 75);
        assert_eq!(second.len(), 5);
        assert_eq!(first[0]["multiverse_id"], 1);
        assert_eq!(second[4]["multiverse_id"], 80);
    }

    #[test]
    fn not_found_entries_round_trip() {
        let wire = serde_json::json!({ "id": "94c70f23-0ca9-425e-a53a-111111111111" });
        let ident: CardIdentifier = serde_json::from_value(wire).unwrap();
        assert_eq!(
            ident.id.as_deref(),
            Some("94c70f23-0ca9-425e-a53a-111111111111")
        );
    }
}
