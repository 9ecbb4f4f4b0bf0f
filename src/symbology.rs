//! Card symbols and mana cost parsing.

use crate::{
    client::{Request, ScryfallClient},
    pager::ListEnvelope,
    types::{CardSymbol, ManaCost},
};

/// Symbology endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Symbology<'a> {
    client: &'a ScryfallClient,
}

impl ScryfallClient {
    /// Symbology endpoints.
    #[must_use]
    pub fn symbology(&self) -> Symbology<'_> {
        Symbology { client: self }
    }
}

impl Symbology<'_> {
    /// Every symbol usable in mana costs and oracle text.
    pub async fn all(&self) -> Vec<CardSymbol> {
        self.client
            .query::<ListEnvelope<CardSymbol>>(Request::get("symbology"))
            .await
            .map(|list| list.data)
            .unwrap_or_default()
    }

    /// Parse a loosely written mana cost into its normalized form.
    pub async fn parse_mana(&self, cost: &str) -> Option<ManaCost> {
        self.client
            .query(Request::get("symbology/parse-mana").param("cost", cost))
            .await
    }
}
