//! Response object model for the API.
//!
//! Decoders are tolerant: everything the server may omit is `Option` or
//! defaulted, so older or trimmed payloads still parse.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single printing of a card.
#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub oracle_id: Option<String>,
    #[serde(default)]
    pub multiverse_ids: Vec<u32>,
    #[serde(default)]
    pub mtgo_id: Option<u32>,
    #[serde(default)]
    pub mtgo_foil_id: Option<u32>,
    #[serde(default)]
    pub arena_id: Option<u32>,
    #[serde(default)]
    pub tcgplayer_id: Option<u32>,
    #[serde(default)]
    pub cardmarket_id: Option<u32>,
    #[serde(default)]
    pub lang: Option<String>,
    /// Localized name, present on non-English printings.
    #[serde(default)]
    pub printed_name: Option<String>,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub scryfall_uri: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub highres_image: bool,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub legalities: HashMap<String, String>,
    #[serde(default)]
    pub games: Vec<String>,
    #[serde(default)]
    pub reserved: bool,
    #[serde(default)]
    pub finishes: Vec<String>,
    #[serde(default)]
    pub oversized: bool,
    #[serde(default)]
    pub promo: bool,
    #[serde(default)]
    pub reprint: bool,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub set_type: Option<String>,
    #[serde(default)]
    pub collector_number: Option<String>,
    #[serde(default)]
    pub digital: bool,
    #[serde(default)]
    pub rarity: Option<String>,
    /// Faces of a multi-faced card; empty for single-faced layouts.
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub frame: Option<String>,
    #[serde(default)]
    pub full_art: bool,
    #[serde(default)]
    pub textless: bool,
    #[serde(default)]
    pub story_spotlight: bool,
    #[serde(default)]
    pub edhrec_rank: Option<u32>,
    #[serde(default)]
    pub prices: Option<Prices>,
    #[serde(default)]
    pub related_uris: HashMap<String, String>,
    #[serde(default)]
    pub purchase_uris: HashMap<String, String>,
}

/// One face of a multi-faced card.
#[derive(Debug, Clone, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub printed_name: Option<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

/// Image renditions of a card or face.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUris {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub normal: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub art_crop: Option<String>,
    #[serde(default)]
    pub border_crop: Option<String>,
}

/// Market prices, as decimal strings in their native currency.
#[derive(Debug, Clone, Deserialize)]
pub struct Prices {
    #[serde(default)]
    pub usd: Option<String>,
    #[serde(default)]
    pub usd_foil: Option<String>,
    #[serde(default)]
    pub usd_etched: Option<String>,
    #[serde(default)]
    pub eur: Option<String>,
    #[serde(default)]
    pub eur_foil: Option<String>,
    #[serde(default)]
    pub tix: Option<String>,
}

/// A Magic set.
#[derive(Debug, Clone, Deserialize)]
pub struct Set {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub mtgo_code: Option<String>,
    #[serde(default)]
    pub arena_code: Option<String>,
    #[serde(default)]
    pub tcgplayer_id: Option<u32>,
    #[serde(default)]
    pub set_type: Option<String>,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub block_code: Option<String>,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub parent_set_code: Option<String>,
    #[serde(default)]
    pub card_count: u32,
    #[serde(default)]
    pub printed_size: Option<u32>,
    #[serde(default)]
    pub digital: bool,
    #[serde(default)]
    pub foil_only: bool,
    #[serde(default)]
    pub nonfoil_only: bool,
    #[serde(default)]
    pub scryfall_uri: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub icon_svg_uri: Option<String>,
    #[serde(default)]
    pub search_uri: Option<String>,
}

/// An official ruling on a card's oracle text.
#[derive(Debug, Clone, Deserialize)]
pub struct Ruling {
    #[serde(default)]
    pub oracle_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    pub comment: String,
}

/// A symbol usable in mana costs and oracle text.
#[derive(Debug, Clone, Deserialize)]
pub struct CardSymbol {
    pub symbol: String,
    #[serde(default)]
    pub loose_variant: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub transposable: bool,
    #[serde(default)]
    pub represents_mana: bool,
    #[serde(default)]
    pub mana_value: Option<f64>,
    #[serde(default)]
    pub appears_in_mana_costs: bool,
    #[serde(default)]
    pub funny: bool,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub gatherer_alternates: Vec<String>,
}

/// A parsed, normalized mana cost.
#[derive(Debug, Clone, Deserialize)]
pub struct ManaCost {
    pub cost: String,
    #[serde(default)]
    pub cmc: f64,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub colorless: bool,
    #[serde(default)]
    pub monocolored: bool,
    #[serde(default)]
    pub multicolored: bool,
}

/// A catalog of string values (card names, creature types, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub total_values: usize,
    #[serde(default)]
    pub data: Vec<String>,
}

/// The kinds of downloadable bulk snapshot files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkDataType {
    OracleCards,
    UniqueArtwork,
    DefaultCards,
    AllCards,
    Rulings,
}

impl BulkDataType {
    /// The identifier used in API paths and payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OracleCards => "oracle_cards",
            Self::UniqueArtwork => "unique_artwork",
            Self::DefaultCards => "default_cards",
            Self::AllCards => "all_cards",
            Self::Rulings => "rulings",
        }
    }
}

/// Metadata for one downloadable bulk snapshot file.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDataDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BulkDataType,
    /// When the snapshot was last rebuilt.
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub compressed_size: Option<u64>,
    pub download_uri: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub content_encoding: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_card_payload_parses() {
        let card: Card = serde_json::from_value(serde_json::json!({
            "id": "9ea8179a-d3c9-4cdc-a5b5-68cc73279050",
            "name": "Blood Scrivener"
        }))
        .unwrap();

        assert_eq!(card.name, "Blood Scrivener");
        assert!(card.multiverse_ids.is_empty());
        assert!(card.card_faces.is_empty());
        assert_eq!(card.set, "");
    }

    #[test]
    fn full_card_payload_parses() {
        let card: Card = serde_json::from_value(serde_json::json!({
            "id": "9ea8179a-d3c9-4cdc-a5b5-68cc73279050",
            "name": "Blood Scrivener",
            "lang": "en",
            "multiverse_ids": [369_030],
            "mtgo_id": 48_338,
            "layout": "normal",
            "cmc": 2.0,
            "type_line": "Creature — Zombie Wizard",
            "colors": ["B"],
            "legalities": { "modern": "legal" },
            "set": "dgm",
            "collector_number": "22",
            "rarity": "rare",
            "prices": { "usd": "0.25", "tix": null },
            "image_uris": { "normal": "https://img.example/n.jpg" }
        }))
        .unwrap();

        assert_eq!(card.multiverse_ids, vec![369_030]);
        assert_eq!(card.legalities["modern"], "legal");
        assert_eq!(card.prices.unwrap().usd.as_deref(), Some("0.25"));
    }

    #[test]
    fn bulk_data_type_names() {
        assert_eq!(BulkDataType::AllCards.as_str(), "all_cards");
        let parsed: BulkDataType = serde_json::from_value(serde_json::json!("rulings")).unwrap();
        assert_eq!(parsed, BulkDataType::Rulings);
    }

    #[test]
    fn bulk_definition_timestamp_parses() {
        let definition: BulkDataDefinition = serde_json::from_value(serde_json::json!({
            "id": "def-1",
            "type": "rulings",
            "updated_at": "2024-03-01T09:15:00+00:00",
            "download_uri": "https://data.example/rulings.json",
            "compressed_size": 21_456_120u64
        }))
        .unwrap();

        assert_eq!(definition.kind, BulkDataType::Rulings);
        assert_eq!(definition.updated_at.timezone(), Utc);
        assert_eq!(definition.compressed_size, Some(21_456_120));
    }
}
