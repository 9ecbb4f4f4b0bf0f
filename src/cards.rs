//! Card lookups, full-text search and batch collection.

use crate::{
    client::{Request, ScryfallClient},
    identifier::{chunk_bodies, CardIdentifier},
    pager::Pager,
    types::{Card, Catalog},
};

/// Which printings a search should keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueStrategy {
    Cards,
    Art,
    Prints,
}

impl UniqueStrategy {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::Art => "art",
            Self::Prints => "prints",
        }
    }
}

/// Sort key for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Name,
    Set,
    Released,
    Rarity,
    Color,
    Usd,
    Tix,
    Eur,
    Cmc,
    Power,
    Toughness,
    Edhrec,
    Artist,
}

impl SortOrder {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Set => "set",
            Self::Released => "released",
            Self::Rarity => "rarity",
            Self::Color => "color",
            Self::Usd => "usd",
            Self::Tix => "tix",
            Self::Eur => "eur",
            Self::Cmc => "cmc",
            Self::Power => "power",
            Self::Toughness => "toughness",
            Self::Edhrec => "edhrec",
            Self::Artist => "artist",
        }
    }
}

/// Sort direction for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Auto,
    Asc,
    Desc,
}

impl SortDirection {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Tuning knobs for [`Cards::search`].
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub unique: Option<UniqueStrategy>,
    pub order: Option<SortOrder>,
    pub dir: Option<SortDirection>,
    pub include_extras: bool,
    pub include_multilingual: bool,
    pub include_variations: bool,
    /// First page to fetch (1-based, default 1).
    pub page: Option<u32>,
}

/// Card endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Cards<'a> {
    client: &'a ScryfallClient,
}

impl ScryfallClient {
    /// Card endpoints.
    #[must_use]
    pub fn cards(&self) -> Cards<'_> {
        Cards { client: self }
    }
}

impl Cards<'_> {
    /// Fetch a card by its Scryfall id.
    pub async fn by_id(&self, id: &str) -> Option<Card> {
        self.client.query(Request::get(format!("cards/{id}"))).await
    }

    /// Fetch a card by name.
    ///
    /// `fuzzy` tolerates minor misspellings; `set` restricts the lookup to
    /// one set's printing.
    pub async fn by_name(&self, name: &str, set: Option<&str>, fuzzy: bool) -> Option<Card> {
        let key = if fuzzy { "fuzzy" } else { "exact" };
        let mut request = Request::get("cards/named").param(key, name);
        if let Some(set) = set {
            request = request.param("set", set);
        }
        self.client.query(request).await
    }

    /// Fetch a card by set code and collector number, optionally in a
    /// specific language.
    pub async fn by_set(&self, set: &str, collector_number: u32, lang: Option<&str>) -> Option<Card> {
        let path = match lang {
            Some(lang) => format!("cards/{set}/{collector_number}/{lang}"),
            None => format!("cards/{set}/{collector_number}"),
        };
        self.client.query(Request::get(path)).await
    }

    /// Fetch a card by Multiverse id.
    pub async fn by_multiverse_id(&self, id: u32) -> Option<Card> {
        self.client
            .query(Request::get(format!("cards/multiverse/{id}")))
            .await
    }

    /// Fetch a card by MTGO id.
    pub async fn by_mtgo_id(&self, id: u32) -> Option<Card> {
        self.client
            .query(Request::get(format!("cards/mtgo/{id}")))
            .await
    }

    /// Fetch a card by Arena id.
    pub async fn by_arena_id(&self, id: u32) -> Option<Card> {
        self.client
            .query(Request::get(format!("cards/arena/{id}")))
            .await
    }

    /// Fetch a card by TCGplayer id.
    pub async fn by_tcgplayer_id(&self, id: u32) -> Option<Card> {
        self.client
            .query(Request::get(format!("cards/tcgplayer/{id}")))
            .await
    }

    /// Fetch a random card.
    pub async fn random(&self) -> Option<Card> {
        self.client.query(Request::get("cards/random")).await
    }

    /// Name completions for a partial card name. Empty when the lookup
    /// fails; check the last-error slot to tell the cases apart.
    pub async fn autocomplete_name(&self, partial: &str) -> Vec<String> {
        self.client
            .query::<Catalog>(Request::get("cards/autocomplete").param("q", partial))
            .await
            .map(|catalog| catalog.data)
            .unwrap_or_default()
    }

    /// Full-text search over every card, as a paginated [`Pager`].
    pub fn search(&self, query: &str, options: &SearchOptions) -> Pager<Card> {
        let mut request = Request::get("cards/search")
            .param("q", query)
            .param("page", options.page.unwrap_or(1));
        if let Some(unique) = options.unique {
            request = request.param("unique", unique.as_str());
        }
        if let Some(order) = options.order {
            request = request.param("order", order.as_str());
        }
        if let Some(dir) = options.dir {
            request = request.param("dir", dir.as_str());
        }
        if options.include_extras {
            request = request.param("include_extras", "true");
        }
        if options.include_multilingual {
            request = request.param("include_multilingual", "true");
        }
        if options.include_variations {
            request = request.param("include_variations", "true");
        }
        self.client.paged(request)
    }

    /// Batch lookup of specific printings.
    ///
    /// Identifiers are chunked to the server's per-request limit, one
    /// request per chunk, and results concatenate in input order. Whatever
    /// the server cannot resolve lands in
    /// [`ListResults::not_found`](crate::ListResults).
    pub fn collection(&self, identifiers: &[CardIdentifier]) -> Pager<Card> {
        self.client
            .chunked("cards/collection", chunk_bodies(identifiers))
    }
}
