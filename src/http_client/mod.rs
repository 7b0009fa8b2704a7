mod account;
mod campaign;

use reqwest::{Client, RequestBuilder, StatusCode, header::{HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT, CONTENT_TYPE}};
use serde::de::DeserializeOwned;
use thiserror::Error;
use log::debug;
use url::Url;

use crate::config::Secret;

pub use account::AccountInfo;
pub use campaign::{statistics, Campaign, CampaignPage, CampaignStatus, ListParams};

/// placeholder for fields the provider left out
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Error, Debug)]
pub enum HttpClientError {
    #[error("BREVO_API_KEY environment variable is not set")]
    MissingApiKey,
    #[error("API key is not a valid header value")]
    InvalidApiKey(#[from] InvalidHeaderValue),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("API base URL cannot hold a path: {0}")]
    BaseUrlCannotBeABase(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Malformed JSON response: {0}")]
    Json(#[from] serde_json::Error)
}

type Result<T> = std::result::Result<T, HttpClientError>;

/// result of a single API call
#[derive(Debug)]
pub enum ApiOutcome<T> {
    /// 200 with a parsed body
    Success(T),
    /// any other status, with the raw body
    HttpError {
        status: StatusCode,
        body: String
    },
    /// request never completed or the body could not be parsed
    TransportError(HttpClientError)
}

pub struct HttpClient {
    client: Client,
    base_url: Url,
    api_key: Option<Secret>
}

impl HttpClient {
    pub fn init(base_url: &str, api_key: Option<Secret>) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(HttpClientError::BaseUrlCannotBeABase(base_url.into()));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key
        })
    }

    /// headers sent with every request. fails without touching the network if there is no key
    pub fn headers(&self) -> Result<HeaderMap> {
        let key = self.api_key.as_ref().ok_or(HttpClientError::MissingApiKey)?;

        let mut key_value = HeaderValue::from_str(key.expose())?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("api-key", key_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// base url with the given path segments appended (each one percent-encoded)
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET a JSON document. only a missing key is an `Err`;
    /// a key that cannot be sent is reported like any other failed request
    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<ApiOutcome<T>> {
        let headers = match self.headers() {
            Ok(headers) => headers,
            Err(HttpClientError::MissingApiKey) => return Err(HttpClientError::MissingApiKey),
            Err(e) => {
                debug!("Unusable API key: {}", e);
                return Ok(ApiOutcome::TransportError(e));
            }
        };
        debug!("GET {} {:?}", url, query);

        let req = self.client
            .get(url)
            .headers(headers)
            .query(query);

        Ok(match Self::send(req).await {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!("Request failed: {}", e);
                ApiOutcome::TransportError(e)
            }
        })
    }

    async fn send<T: DeserializeOwned>(req: RequestBuilder) -> Result<ApiOutcome<T>> {
        let res = req.send().await?;
        let status = res.status();
        let body = res.text().await?;
        debug!("Response {} ({} bytes)", status, body.len());

        if status == StatusCode::OK {
            Ok(ApiOutcome::Success(serde_json::from_str(&body)?))
        } else {
            Ok(ApiOutcome::HttpError { status, body })
        }
    }
}
