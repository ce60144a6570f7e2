// src/api/client.rs
// =============================================================================
// Authenticated, paginated GET requests against a hosting API.
//
// Pagination strategy:
// - Request page 1, 2, 3, ... with per_page=100
// - Stop when a page comes back empty, or when the response carries no
//   continuation marker (GitLab: a non-empty `x-next-page` header,
//   GitHub: a `Link` header with rel="next")
//
// Pages are produced lazily as a Stream. Nothing is fetched until the stream
// is polled, and calling `pages` again starts over from page 1.
//
// Requests are strictly sequential. There are no retries: a failed page
// ends the listing and whatever was collected before it is kept.
// =============================================================================

use futures::stream::{self, Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::error::ApiError;

const PER_PAGE: &str = "100";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// How a platform tells us there is another page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageScheme {
    /// GitLab: `x-next-page: 3` (empty on the last page)
    NextPageHeader,
    /// GitHub: `Link: <...>; rel="next"`
    LinkHeader,
}

impl PageScheme {
    fn has_next(self, headers: &HeaderMap) -> bool {
        match self {
            PageScheme::NextPageHeader => headers
                .get("x-next-page")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| !v.trim().is_empty()),
            PageScheme::LinkHeader => headers
                .get(reqwest::header::LINK)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.split(',').any(|part| part.contains("rel=\"next\""))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    scheme: PageScheme,
}

impl ApiClient {
    // Creates a client rooted at an API base URL
    //
    // Parameters:
    //   base: e.g. "https://gitlab.com/api/v4" or "https://api.github.com"
    //   auth: optional (header name, header value) sent with every request
    //   scheme: how this API signals further pages
    pub fn new(
        base: &str,
        auth: Option<(HeaderName, String)>,
        scheme: PageScheme,
    ) -> Result<Self, ApiError> {
        // A trailing slash makes Url::join append instead of replacing the
        // last path segment
        let normalized = format!("{}/", base.trim_end_matches('/'));
        let base = Url::parse(&normalized).map_err(|_| ApiError::Endpoint(base.to_string()))?;

        let mut headers = HeaderMap::new();
        if let Some((name, token)) = auth {
            let mut value = HeaderValue::from_str(&token).map_err(|_| ApiError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { http, base, scheme })
    }

    // Resolves a relative endpoint such as "projects/42/issues"
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|_| ApiError::Endpoint(path.to_string()))
    }

    // Fetches a single JSON document (no pagination)
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self.send(&url).await?;
        decode(&url, response).await
    }

    // Lazily yields pages of an endpoint
    //
    // Each item is one page. The stream ends after the last page, or right
    // after yielding an error.
    pub fn pages<'a, T>(
        &'a self,
        url: Url,
        params: Vec<(String, String)>,
    ) -> impl Stream<Item = Result<Vec<T>, ApiError>> + 'a
    where
        T: DeserializeOwned + 'a,
    {
        stream::unfold(Some(1_u32), move |page| {
            let url = url.clone();
            let params = params.clone();
            async move {
                let page = page?;
                match self.fetch_page::<T>(url, &params, page).await {
                    Ok((items, _)) if items.is_empty() => None,
                    Ok((items, has_next)) => Some((Ok(items), has_next.then_some(page + 1))),
                    Err(error) => Some((Err(error), None)),
                }
            }
        })
    }

    // Collects every page of an endpoint
    //
    // Never fails: errors are logged with a hint and the items gathered so
    // far are returned (possibly none).
    pub async fn collect_all<T: DeserializeOwned + 'static>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Vec<T> {
        let url = match self.endpoint(path) {
            Ok(url) => url,
            Err(error) => {
                warn!(%error, "skipping listing");
                return Vec::new();
            }
        };

        let params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut items = Vec::new();
        let mut pages = Box::pin(self.pages::<T>(url.clone(), params));
        while let Some(page) = pages.next().await {
            match page {
                Ok(batch) => items.extend(batch),
                Err(error) => {
                    log_api_error(&error);
                    break;
                }
            }
        }

        debug!(%url, count = items.len(), "listing complete");
        items
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        mut url: Url,
        params: &[(String, String)],
        page: u32,
    ) -> Result<(Vec<T>, bool), ApiError> {
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("per_page", PER_PAGE);
            query.append_pair("page", &page.to_string());
        }

        let response = self.send(&url).await?;
        let has_next = self.scheme.has_next(response.headers());
        let items = decode(&url, response).await?;
        Ok((items, has_next))
    }

    async fn send(&self, url: &Url) -> Result<Response, ApiError> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(ApiError::from_status(response.status(), url));
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

// Logs an API error together with its status-specific hint
pub fn log_api_error(error: &ApiError) {
    match error.hint() {
        Some(hint) => warn!(%error, hint, "API request failed"),
        None => warn!(%error, "API request failed"),
    }
}
