//! Set lookups.

use crate::{
    client::{Request, ScryfallClient},
    types::Set,
};

/// Set endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Sets<'a> {
    client: &'a ScryfallClient,
}

impl ScryfallClient {
    /// Set endpoints.
    #[must_use]
    pub fn sets(&self) -> Sets<'_> {
        Sets { client: self }
    }
}

impl Sets<'_> {
    /// Fetch a set by its code, e.g. `hou`.
    pub async fn by_code(&self, code: &str) -> Option<Set> {
        self.client.query(Request::get(format!("sets/{code}"))).await
    }

    /// Fetch a set by its Scryfall id.
    pub async fn by_id(&self, id: &str) -> Option<Set> {
        self.client.query(Request::get(format!("sets/{id}"))).await
    }

    /// Fetch a set by TCGplayer id.
    pub async fn by_tcgplayer_id(&self, id: u32) -> Option<Set> {
        self.client
            .query(Request::get(format!("sets/tcgplayer/{id}")))
            .await
    }

    /// Every set, following pagination to the end. Empty when the query
    /// fails; check the last-error slot to tell the cases apart.
    pub async fn all(&self) -> Vec<Set> {
        self.client
            .paged(Request::get("sets"))
            .wait_for_all()
            .await
            .data
    }
}
