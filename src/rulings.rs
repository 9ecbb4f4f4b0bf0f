//! Ruling lookups.

use crate::{
    client::{Request, ScryfallClient},
    pager::ListEnvelope,
    types::Ruling,
};

/// Ruling endpoints.
///
/// Rulings arrive as a single list page; every method resolves to the
/// decoded list, empty when the card has none or the query failed.
#[derive(Debug, Clone, Copy)]
pub struct Rulings<'a> {
    client: &'a ScryfallClient,
}

impl ScryfallClient {
    /// Ruling endpoints.
    #[must_use]
    pub fn rulings(&self) -> Rulings<'_> {
        Rulings { client: self }
    }
}

impl Rulings<'_> {
    /// Rulings for a card by its Scryfall id.
    pub async fn by_id(&self, id: &str) -> Vec<Ruling> {
        self.fetch(format!("cards/{id}/rulings")).await
    }

    /// Rulings for a card by set code and collector number.
    pub async fn by_set(&self, set: &str, collector_number: u32) -> Vec<Ruling> {
        self.fetch(format!("cards/{set}/{collector_number}/rulings"))
            .await
    }

    /// Rulings for a card by Multiverse id.
    pub async fn by_multiverse_id(&self, id: u32) -> Vec<Ruling> {
        self.fetch(format!("cards/multiverse/{id}/rulings")).await
    }

    /// Rulings for a card by MTGO id.
    pub async fn by_mtgo_id(&self, id: u32) -> Vec<Ruling> {
        self.fetch(format!("cards/mtgo/{id}/rulings")).await
    }

    /// Rulings for a card by Arena id.
    pub async fn by_arena_id(&self, id: u32) -> Vec<Ruling> {
        self.fetch(format!("cards/arena/{id}/rulings")).await
    }

    async fn fetch(&self, path: String) -> Vec<Ruling> {
        self.client
            .query::<ListEnvelope<Ruling>>(Request::get(path))
            .await
            .map(|list| list.data)
            .unwrap_or_default()
    }
}
