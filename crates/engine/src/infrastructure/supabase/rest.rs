//! Minimal PostgREST client for the hosted store.
//!
//! Supports exactly what the repos need: equality filters, select,
//! insert, partial update and delete. Every request authenticates with the
//! service role key, so row-level security is bypassed and ownership is
//! enforced by the use cases.

use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::infrastructure::ports::RepoError;

const RETURN_REPRESENTATION: &str = "return=representation";

/// Shared handle to the hosted project. Cheap to clone.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    /// Start a query against `table`.
    pub fn from(&self, table: &'static str) -> TableQuery<'_> {
        TableQuery {
            client: self,
            table,
            columns: "*",
            filters: Vec::new(),
        }
    }

    pub(super) fn http(&self) -> &Client {
        &self.http
    }

    pub(super) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) fn service_key(&self) -> &str {
        &self.service_key
    }

    fn with_service_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

/// A query being built against one table.
pub struct TableQuery<'a> {
    client: &'a SupabaseClient,
    table: &'static str,
    columns: &'static str,
    filters: Vec<(&'static str, String)>,
}

impl<'a> TableQuery<'a> {
    /// Restrict the returned columns (default `*`).
    pub fn select(mut self, columns: &'static str) -> Self {
        self.columns = columns;
        self
    }

    /// Add an equality filter, `column=eq.value`.
    pub fn eq(mut self, column: &'static str, value: impl ToString) -> Self {
        self.filters.push((column, format!("eq.{}", value.to_string())));
        self
    }

    /// Fetch every matching row.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, RepoError> {
        let request = self.request(reqwest::Method::GET, Some(self.columns), None);
        let response = self.send("select", request).await?;
        decode_rows(response).await
    }

    /// Fetch the first matching row, if any.
    pub async fn fetch_one<T: DeserializeOwned>(self) -> Result<Option<T>, RepoError> {
        let request = self.request(reqwest::Method::GET, Some(self.columns), Some(1));
        let response = self.send("select", request).await?;
        Ok(decode_rows(response).await?.into_iter().next())
    }

    /// Insert one row and return it as stored.
    pub async fn insert<B, T>(self, body: &B) -> Result<T, RepoError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(reqwest::Method::POST, None, None)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(body);
        let response = self.send("insert", request).await?;
        decode_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                RepoError::database("insert", format!("{}: store returned no row", self.table))
            })
    }

    /// Apply a partial update to the matching rows and return the first
    /// updated row. `None` means nothing matched.
    pub async fn update<B, T>(self, body: &B) -> Result<Option<T>, RepoError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(reqwest::Method::PATCH, None, None)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(body);
        let response = self.send("update", request).await?;
        Ok(decode_rows(response).await?.into_iter().next())
    }

    /// Delete the matching rows.
    pub async fn delete(self) -> Result<(), RepoError> {
        let request = self.request(reqwest::Method::DELETE, None, None);
        self.send("delete", request).await?;
        Ok(())
    }

    fn request(
        &self,
        method: reqwest::Method,
        columns: Option<&str>,
        limit: Option<u32>,
    ) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.client.base_url, self.table);

        let mut query: Vec<(&str, String)> = Vec::with_capacity(self.filters.len() + 2);
        if let Some(columns) = columns {
            query.push(("select", columns.to_string()));
        }
        for (column, filter) in &self.filters {
            query.push((*column, filter.clone()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        self.client
            .with_service_auth(self.client.http.request(method, url))
            .query(&query)
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, RepoError> {
        let response = request
            .send()
            .await
            .map_err(|e| RepoError::database(operation, format!("{}: {}", self.table, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                table = self.table,
                operation,
                status = %status,
                "Hosted store rejected request"
            );
            return Err(RepoError::database(
                operation,
                format!("{} returned {}: {}", self.table, status, body),
            ));
        }

        Ok(response)
    }
}

async fn decode_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, RepoError> {
    response
        .json::<Vec<T>>()
        .await
        .map_err(RepoError::serialization)
}
