// Hand-crafted async HTTP client for the hosting fleet-management API (v2).
//
// Base path: /v2/ (or wherever the configured base URL points)
// Auth: Authorization: Bearer <api key>

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::types;

// ── Error response shape from the vendor API ─────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the vendor fleet-management API.
///
/// Uses bearer-token authentication and communicates via JSON REST
/// endpoints under the configured base URL.
pub struct FleetClient {
    http: reqwest::Client,
    base_url: Url,
}

impl FleetClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `Authorization: Bearer <key>` as a default header on
    /// every request, marked sensitive so it never lands in logs.
    pub fn from_api_key(
        base_url: &str,
        api_key: &secrecy::SecretString,
        transport: &crate::TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and guarantee a trailing slash so relative
    /// joins append instead of replacing the last path segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"sites"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining `sites/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                // The cut must land on a char boundary; byte 200 can sit
                // inside a multibyte character in an HTML error page.
                let mut cut = body.len().min(200);
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                let preview = &body[..cut];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        let raw = resp.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse {
                message: Some(message),
            }) => Error::Api {
                status: status.as_u16(),
                message,
            },
            _ => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
            },
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Sites ────────────────────────────────────────────────────────

    /// Enumerate the fleet members belonging to a company.
    pub async fn list_sites(&self, company: &str) -> Result<types::SitesEnvelope, Error> {
        self.get_with_params("sites", &[("company", company.to_owned())])
            .await
    }

    // ── Environments ─────────────────────────────────────────────────

    /// List the environments of one site.
    pub async fn list_environments(
        &self,
        site_id: &str,
    ) -> Result<types::EnvironmentsEnvelope, Error> {
        self.get(&format!("sites/{site_id}/environments")).await
    }

    // ── Plugins ──────────────────────────────────────────────────────

    /// Read the installed-plugins container info for an environment.
    pub async fn list_plugins(&self, env_id: &str) -> Result<types::PluginsEnvelope, Error> {
        self.get(&format!("sites/environments/{env_id}/plugins"))
            .await
    }

    /// Request a plugin version change on an environment.
    ///
    /// Acceptance is signalled by `status: 202` in the response body
    /// together with an `operation_id` to poll.
    pub async fn update_plugin(
        &self,
        env_id: &str,
        body: &types::PluginUpdateRequest<'_>,
    ) -> Result<types::UpdateResponse, Error> {
        self.put(&format!("sites/environments/{env_id}/plugins"), body)
            .await
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Poll an asynchronous server-side operation by id.
    pub async fn get_operation(&self, operation_id: &str) -> Result<types::OperationStatus, Error> {
        self.get(&format!("operations/{operation_id}")).await
    }
}
