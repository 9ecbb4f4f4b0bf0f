//! Odds and ends outside the main object model.

use crate::{
    client::{Request, ScryfallClient},
    pager::ListEnvelope,
};

/// Miscellaneous endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Misc<'a> {
    client: &'a ScryfallClient,
}

impl ScryfallClient {
    /// Miscellaneous endpoints.
    #[must_use]
    pub fn misc(&self) -> Misc<'_> {
        Misc { client: self }
    }
}

impl Misc<'_> {
    /// Links currently featured on the homepage. The payload shape is not
    /// guaranteed, so entries are raw JSON values.
    pub async fn homepage_links(&self) -> Vec<serde_json::Value> {
        self.client
            .query::<ListEnvelope<serde_json::Value>>(Request::get("homepage-links"))
            .await
            .map(|list| list.data)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::config::ScryfallConfig;

    #[tokio::test]
    async fn homepage_links_pass_through_raw_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/homepage-links"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "object": "list",
                "has_more": false,
                "data": [{ "title": "Banned list updated", "uri": "https://example.test" }]
            })))
            .mount(&server)
            .await;

        let client = ScryfallClient::with_config(ScryfallConfig {
            api_url: server.uri(),
            ..ScryfallConfig::default()
        })
        .unwrap();
        let links = client.misc().homepage_links().await;

        assert_eq!(links.len(), 1);
        assert_eq!(links[0]["title"], "Banned list updated");
    }
}
