use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_RANGE, CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use tracing::error;
use url::Url;

/// Thin JSON client over the hosted data store's PostgREST API. Every
/// repository goes through this; the crate never opens a SQL connection.
/// https://supabase.com/docs/guides/api
pub struct SupabaseRestClient {
    http: reqwest::Client,
    rest_url: Url,
    service_role_key: String,
}

#[derive(Debug, serde::Deserialize)]
struct PostgrestErrorEnvelope {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl SupabaseRestClient {
    pub fn new(project_url: &str, service_role_key: String) -> Result<Self> {
        let base = Url::parse(&format!("{}/", project_url.trim_end_matches('/')))
            .context("SUPABASE_PROJECT_URL is not a valid URL")?;
        let rest_url = base
            .join("rest/v1/")
            .context("failed to derive the PostgREST base URL")?;

        Ok(Self {
            http: reqwest::Client::new(),
            rest_url,
            service_role_key,
        })
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        self.rest_url
            .join(table)
            .with_context(|| format!("invalid table name: {}", table))
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.service_role_key)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.service_role_key),
            )
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (pg_code, pg_message, pg_details, pg_hint) =
            match serde_json::from_str::<PostgrestErrorEnvelope>(&body) {
                Ok(envelope) => (
                    envelope.code,
                    envelope.message,
                    envelope.details,
                    envelope.hint,
                ),
                Err(_) => (None, None, None, None),
            };

        error!(
            status = %status,
            postgrest_code = ?pg_code,
            postgrest_message = ?pg_message,
            postgrest_details = ?pg_details,
            postgrest_hint = ?pg_hint,
            response_body = %body,
            context = %context,
            "supabase rest request failed"
        );

        anyhow::bail!("Supabase request failed: {} (status {})", context, status);
    }

    /// Runs a filtered select and returns the matching rows.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let resp = self
            .with_auth(self.http.get(self.table_url(table)?))
            .query(query)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, table).await?;

        let rows: Vec<T> = resp.json().await?;
        Ok(rows)
    }

    /// Select with `Prefer: count=exact`; the total row count comes back
    /// in the Content-Range header (`<from>-<to>/<total>`).
    pub async fn select_with_count<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<(Vec<T>, i64)> {
        let resp = self
            .with_auth(self.http.get(self.table_url(table)?))
            .header("Prefer", "count=exact")
            .query(query)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, table).await?;

        let total = resp
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total);

        let rows: Vec<T> = resp.json().await?;
        let total = total.unwrap_or(rows.len() as i64);
        Ok((rows, total))
    }

    /// Inserts one row and returns the stored representation.
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self
            .with_auth(self.http.post(self.table_url(table)?))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, table).await?;

        let mut rows: Vec<T> = resp.json().await?;
        rows.pop()
            .with_context(|| format!("insert into {} returned no representation", table))
    }

    /// Patches the rows matched by `query` and returns the first updated row.
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T> {
        let resp = self
            .with_auth(self.http.patch(self.table_url(table)?))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .query(query)
            .json(body)
            .send()
            .await?;
        let resp = Self::ensure_success(resp, table).await?;

        let rows: Vec<T> = resp.json().await?;
        rows.into_iter()
            .next()
            .with_context(|| format!("update on {} matched no rows", table))
    }
}

fn parse_content_range_total(header: &str) -> Option<i64> {
    // "0-19/53" or "*/0"; "*" after the slash means the count is unknown.
    let (_, total) = header.rsplit_once('/')?;
    total.parse().ok()
}
