//! Asynchronous Rust client for the [Scryfall] Magic: The Gathering API.
//!
//! Every lookup goes through one querier with bounded retry and fixed
//! backoff. Failures are recorded in a client-wide last-error slot instead
//! of raised, so lookups resolve to `None` or an empty list and
//! [`ScryfallClient::last_error`] explains why. List endpoints are exposed
//! through a [`Pager`] offering push callbacks, a lazy pull stream and a
//! collect-everything mode over the same pagination engine, with
//! cancellation at item or page granularity.
//!
//! ```no_run
//! use scryfall::ScryfallClient;
//!
//! # async fn demo() -> scryfall::Result<()> {
//! let client = ScryfallClient::new()?;
//! if let Some(card) = client.cards().by_name("Lightning Bolt", None, false).await {
//!     println!("{}", card.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [Scryfall]: https://scryfall.com/docs/api

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod bulk_data;
mod cards;
mod catalog;
mod client;
mod config;
mod error;
mod identifier;
mod misc;
mod pager;
mod rulings;
mod sets;
mod symbology;
mod types;

pub use bulk_data::BulkData;
pub use cards::{Cards, SearchOptions, SortDirection, SortOrder, UniqueStrategy};
pub use catalog::Catalogs;
pub use client::{Request, ScryfallClient};
pub use config::{RetryPolicy, ScryfallConfig};
pub use error::{Error, Result};
pub use identifier::CardIdentifier;
pub use misc::Misc;
pub use pager::{ListResults, Pager, PagerHandle};
pub use rulings::Rulings;
pub use sets::Sets;
pub use symbology::Symbology;
pub use types::{
    BulkDataDefinition, BulkDataType, Card, CardFace, CardSymbol, Catalog, ImageUris, ManaCost,
    Prices, Ruling, Set,
};
