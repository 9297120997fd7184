//! HTTP client for the unit search/filter service.

use super::catalog::{CatalogFuture, SearchResultBody, UnitCatalog};
use crate::error::CatalogError;
use crate::types::*;
use futures::future::FutureExt;
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Catalog backed by the `/units/search` and `/units/filter` endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a client for the service at `base_url`.
    ///
    /// No request timeout is set beyond the transport default.
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .user_agent(concat!("unit_canvas/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The service base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T>(&self, path: &str, params: Vec<(&'static str, String)>) -> CatalogFuture<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&params);

        async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::Status(status.as_u16()));
            }
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        }
        .boxed()
    }
}

/// Query parameters for a filter request; an empty list omits its parameter.
pub fn filter_params(champions: &[String], traits: &[String]) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(2);
    if !champions.is_empty() {
        params.push(("champions", champions.join(",")));
    }
    if !traits.is_empty() {
        params.push(("traits", traits.join(",")));
    }
    params
}

impl UnitCatalog for HttpCatalog {
    fn search(&self, query: &str) -> CatalogFuture<Vec<SearchItem>> {
        self.get_json::<SearchResultBody>("/units/search", vec![("query", query.to_string())])
            .map(|body| body.map(SearchResultBody::into_items))
            .boxed()
    }

    fn filter(&self, champions: &[String], traits: &[String]) -> CatalogFuture<Vec<Unit>> {
        self.get_json("/units/filter", filter_params(champions, traits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lists_are_omitted() {
        assert!(filter_params(&[], &[]).is_empty());
        assert_eq!(
            filter_params(&[], &["Marksman".into(), "Dynamo".into()]),
            vec![("traits", "Marksman,Dynamo".to_string())]
        );
        assert_eq!(
            filter_params(&["Jinx".into()], &["Marksman".into()]),
            vec![
                ("champions", "Jinx".to_string()),
                ("traits", "Marksman".to_string())
            ]
        );
    }

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let catalog = HttpCatalog::new("http://localhost:8080/").unwrap();
        assert_eq!(catalog.base_url(), "http://localhost:8080");
    }
}
