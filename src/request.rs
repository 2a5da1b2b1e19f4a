//! Requests to the GENESIS web service.
//!
//! The query string is built by plain concatenation of `key=value` pairs,
//! values are not percent-encoded.

use crate::{Error, Result, BASE_URL, DEFAULT_SVG, DEFAULT_XLSX, LANGUAGE, VERSION};
use indexmap::IndexMap;
use reqwest::blocking::Client;
use serde_json::Value;
use std::path::PathBuf;

/// Query parameters in the order they are sent.
pub type Params = IndexMap<String, String>;

/// Settings of a single run, built once from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub language: String,
    pub xlsx: PathBuf,
    /// None skips the plot
    pub svg: Option<PathBuf>,
    /// open the plot with the platform viewer once drawn
    pub show: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            base_url: BASE_URL.to_string(),
            language: LANGUAGE.to_string(),
            xlsx: PathBuf::from(DEFAULT_XLSX),
            svg: Some(PathBuf::from(DEFAULT_SVG)),
            show: false,
        }
    }
}

/// Status and body of an HTTP reply, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one GET and hands back the reply.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Reply>;
}

/// The blocking reqwest client, with the default timeout
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<HttpTransport> {
        let client = Client::builder()
            .user_agent(format!("genesis_lpp/{}", VERSION.unwrap_or("unknown")))
            .build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Reply> {
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(Reply { status, body })
    }
}

pub fn query_string(params: &Params) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<String>>()
        .join("&")
}

#[derive(Debug)]
pub struct Dispatcher<T: Transport> {
    base_url: String,
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(config: &Config, transport: T) -> Dispatcher<T> {
        Dispatcher {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// full address for the endpoint, the `?` is always present
    pub fn url(&self, endpoint: &str, params: &Params) -> String {
        format!("{}/{}?{}", self.base_url, endpoint, query_string(params))
    }

    /// Issues a single GET and returns the body of a 2xx reply.
    /// Any other status is an error carrying status and body, no retry.
    pub fn issue(&self, endpoint: &str, params: &Params) -> Result<String> {
        let url = self.url(endpoint, params);
        tracing::debug!(endpoint = endpoint, "issuing request");
        let reply = self.transport.get(&url)?;
        if !reply.is_success() {
            return Err(Error::Remote {
                status: reply.status,
                body: reply.body,
            });
        }
        Ok(reply.body)
    }

    pub fn get_json(&self, endpoint: &str, params: &Params) -> Result<Value> {
        let body = self.issue(endpoint, params)?;
        Ok(serde_json::from_str(&body)?)
    }
}
