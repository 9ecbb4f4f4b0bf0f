//! Catalogs of string values.

use crate::{
    client::{Request, ScryfallClient},
    types::Catalog,
};

/// Catalog endpoints.
///
/// Each method resolves to the catalog's values, empty when the query
/// failed; check the last-error slot to tell the cases apart.
#[derive(Debug, Clone, Copy)]
pub struct Catalogs<'a> {
    client: &'a ScryfallClient,
}

impl ScryfallClient {
    /// Catalog endpoints.
    #[must_use]
    pub fn catalogs(&self) -> Catalogs<'_> {
        Catalogs { client: self }
    }
}

impl Catalogs<'_> {
    /// Every card name, in English where available.
    pub async fn card_names(&self) -> Vec<String> {
        self.fetch("card-names").await
    }

    /// Every illustrator credited on a card.
    pub async fn artist_names(&self) -> Vec<String> {
        self.fetch("artist-names").await
    }

    /// Every word appearing in a card name.
    pub async fn word_bank(&self) -> Vec<String> {
        self.fetch("word-bank").await
    }

    /// Every creature type.
    pub async fn creature_types(&self) -> Vec<String> {
        self.fetch("creature-types").await
    }

    /// Every planeswalker type.
    pub async fn planeswalker_types(&self) -> Vec<String> {
        self.fetch("planeswalker-types").await
    }

    /// Every land type.
    pub async fn land_types(&self) -> Vec<String> {
        self.fetch("land-types").await
    }

    /// Every artifact type.
    pub async fn artifact_types(&self) -> Vec<String> {
        self.fetch("artifact-types").await
    }

    /// Every enchantment type.
    pub async fn enchantment_types(&self) -> Vec<String> {
        self.fetch("enchantment-types").await
    }

    /// Every spell type.
    pub async fn spell_types(&self) -> Vec<String> {
        self.fetch("spell-types").await
    }

    /// Every printed power value.
    pub async fn powers(&self) -> Vec<String> {
        self.fetch("powers").await
    }

    /// Every printed toughness value.
    pub async fn toughnesses(&self) -> Vec<String> {
        self.fetch("toughnesses").await
    }

    /// Every printed loyalty value.
    pub async fn loyalties(&self) -> Vec<String> {
        self.fetch("loyalties").await
    }

    /// Every watermark.
    pub async fn watermarks(&self) -> Vec<String> {
        self.fetch("watermarks").await
    }

    async fn fetch(&self, slug: &str) -> Vec<String> {
        self.client
            .query::<Catalog>(Request::get(format!("catalog/{slug}")))
            .await
            .map(|catalog| catalog.data)
            .unwrap_or_default()
    }
}
