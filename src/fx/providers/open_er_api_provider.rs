use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::fx::fx_constants::PROVIDER_REQUEST_TIMEOUT;
use crate::fx::fx_errors::{FxError, Result};
use crate::fx::fx_traits::FxRateProvider;

const BASE_URL: &str = "https://open.er-api.com/v6/latest";

#[derive(Deserialize, Debug)]
struct OpenErApiResponse {
    result: String,
    rates: HashMap<String, f64>,
}

/// Exchange-rate provider backed by the open.er-api.com free endpoint.
/// Requests carry a bounded timeout so a slow source degrades to cached
/// rates instead of stalling ledger operations.
pub struct OpenErApiProvider {
    client: reqwest::Client,
}

impl OpenErApiProvider {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(PROVIDER_REQUEST_TIMEOUT)
            .build()?;
        Ok(OpenErApiProvider { client })
    }
}

#[async_trait]
impl FxRateProvider for OpenErApiProvider {
    fn name(&self) -> &'static str {
        "OPEN_ER_API"
    }

    async fn fetch_rate(&self, from_currency: &str, to_currency: &str) -> Result<Decimal> {
        let url = format!("{}/{}", BASE_URL, from_currency);

        let response: OpenErApiResponse = self.client.get(&url).send().await?.json().await?;

        if response.result != "success" {
            return Err(FxError::ProviderError(format!(
                "open.er-api returned result '{}' for {}",
                response.result, from_currency
            )));
        }

        let raw = response.rates.get(to_currency).ok_or_else(|| {
            FxError::RateUnavailable(format!("{}/{}", from_currency, to_currency))
        })?;

        Decimal::from_f64_retain(*raw).ok_or_else(|| {
            FxError::InvalidRate(format!(
                "open.er-api rate for {}/{} not representable: {}",
                from_currency, to_currency, raw
            ))
        })
    }
}
