//! Bulk snapshot definitions and freshness-gated downloads.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio_stream::Stream;
use tracing::debug;

use crate::{
    client::{Request, ScryfallClient},
    pager::ListEnvelope,
    types::{BulkDataDefinition, BulkDataType},
};

/// Bulk data endpoints.
#[derive(Debug, Clone, Copy)]
pub struct BulkData<'a> {
    client: &'a ScryfallClient,
}

impl ScryfallClient {
    /// Bulk data endpoints.
    #[must_use]
    pub fn bulk_data(&self) -> BulkData<'_> {
        BulkData { client: self }
    }
}

impl BulkData<'_> {
    /// Every available bulk snapshot definition.
    pub async fn definitions(&self) -> Vec<BulkDataDefinition> {
        self.client
            .query::<ListEnvelope<BulkDataDefinition>>(Request::get("bulk-data"))
            .await
            .map(|list| list.data)
            .unwrap_or_default()
    }

    /// Fetch one definition by its id.
    pub async fn definition_by_id(&self, id: &str) -> Option<BulkDataDefinition> {
        self.client
            .query(Request::get(format!("bulk-data/{id}")))
            .await
    }

    /// Fetch one definition by snapshot kind.
    pub async fn definition_by_type(&self, kind: BulkDataType) -> Option<BulkDataDefinition> {
        self.client
            .query(Request::get(format!("bulk-data/{}", kind.as_str())))
            .await
    }

    /// Download a snapshot by definition id if it has been rebuilt since
    /// `since`; `None` when the local copy is still current or the query
    /// failed.
    pub async fn download_by_id(
        &self,
        id: &str,
        since: Option<DateTime<Utc>>,
    ) -> Option<impl Stream<Item = reqwest::Result<Bytes>>> {
        let definition = self.definition_by_id(id).await?;
        self.fetch_snapshot(&definition, since).await
    }

    /// Download a snapshot by kind if it has been rebuilt since `since`;
    /// `None` when the local copy is still current or the query failed.
    pub async fn download_by_type(
        &self,
        kind: BulkDataType,
        since: Option<DateTime<Utc>>,
    ) -> Option<impl Stream<Item = reqwest::Result<Bytes>>> {
        let definition = self.definition_by_type(kind).await?;
        self.fetch_snapshot(&definition, since).await
    }

    async fn fetch_snapshot(
        &self,
        definition: &BulkDataDefinition,
        since: Option<DateTime<Utc>>,
    ) -> Option<impl Stream<Item = reqwest::Result<Bytes>>> {
        if since.is_some_and(|last| last > definition.updated_at) {
            debug!(id = %definition.id, "snapshot unchanged since last download");
            return None;
        }
        self.client
            .stream_bytes(&definition.download_uri)
            .await
            .ok()
    }
}
