//! Blocking price guide client with OAuth1 request signing

use super::response::interpret_response;
use crate::config::Credentials;
use crate::error::{PricerError, Result};
use crate::models::{Condition, ItemType, LookupOutcome};
use oauth1_request as oauth;
use std::time::Duration;

/// BrickLink store API v1
pub const BASE_URL: &str = "https://api.bricklink.com/api/store/v1";

const GUIDE_TYPE: &str = "stock";
const CURRENCY_CODE: &str = "USD";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEBUG_BODY_CHARS: usize = 500;

/// Anything that can quote a price guide for an item.
///
/// Implementations report every failure through [`LookupOutcome::Failure`]
/// and never return an error.
pub trait PriceSource {
    fn fetch_price(&self, item_id: &str, item_type: ItemType, condition: Condition)
        -> LookupOutcome;
}

/// Query string of the price guide endpoint (fields kept in sorted order)
#[derive(oauth::Request)]
struct PriceGuideQuery {
    currency_code: &'static str,
    guide_type: &'static str,
    new_or_used: &'static str,
}

pub struct BricklinkClient {
    http: reqwest::blocking::Client,
    credentials: Credentials,
    base_url: String,
}

impl BricklinkClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_base_url(credentials, BASE_URL)
    }

    /// Creates a client against another base URL (for testing with mock servers).
    pub fn with_base_url(credentials: Credentials, base_url: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent("bricklink_pricer/1.0")
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/items/{TYPE}/{id}/price`
    pub fn price_guide_url(&self, item_id: &str, item_type: ItemType) -> String {
        format!(
            "{}/items/{}/{}/price",
            self.base_url,
            item_type.api_name(),
            urlencoding::encode(item_id)
        )
    }

    fn token(&self) -> oauth::Token<&str, &str> {
        oauth::Token::from_parts(
            self.credentials.consumer_key.as_str(),
            self.credentials.consumer_secret.as_str(),
            self.credentials.token_key.as_str(),
            self.credentials.token_secret.as_str(),
        )
    }

    fn request_price_guide(
        &self,
        item_id: &str,
        item_type: ItemType,
        condition: Condition,
    ) -> Result<LookupOutcome> {
        let url = self.price_guide_url(item_id, item_type);
        let query = PriceGuideQuery {
            currency_code: CURRENCY_CODE,
            guide_type: GUIDE_TYPE,
            new_or_used: condition.code(),
        };

        log::debug!("Requesting URL: {}", url);
        log::debug!(
            "Parameters: new_or_used={}, guide_type={}, currency_code={}",
            query.new_or_used,
            query.guide_type,
            query.currency_code
        );

        let authorization = oauth::get(&url, &query, &self.token(), oauth::HMAC_SHA1);
        let response = self
            .http
            .get(oauth::to_query(url, &query))
            .header(reqwest::header::AUTHORIZATION, authorization)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        log::debug!("Response status: {}", status);
        log::debug!(
            "Response body: {}",
            body.chars().take(DEBUG_BODY_CHARS).collect::<String>()
        );

        Ok(interpret_response(status.as_u16(), &body))
    }
}

impl PriceSource for BricklinkClient {
    fn fetch_price(
        &self,
        item_id: &str,
        item_type: ItemType,
        condition: Condition,
    ) -> LookupOutcome {
        match self.request_price_guide(item_id, item_type, condition) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::debug!("Request for {} ({}) failed: {}", item_id, item_type, e);
                let status = match &e {
                    PricerError::Network(err) => err.status().map(|s| s.as_u16()),
                    _ => None,
                };
                LookupOutcome::Failure {
                    error: e.to_string(),
                    status,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
