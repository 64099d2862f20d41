use chrono::Utc;
use dashmap::DashMap;
use log::warn;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

use super::fx_constants::{DEFAULT_RATE_TTL, RATE_SOURCE_MANUAL};
use super::fx_errors::{FxError, Result};
use super::fx_model::{CachedRate, ExchangeRate, NewExchangeRate};
use super::fx_repository::FxRepository;
use super::fx_traits::FxRateProvider;

/// Currency layer of the conversion resolver: a TTL-bounded in-memory cache
/// over a persisted rate table, refreshed through an external quote source.
/// Provider failures degrade to the last cached rate, then to the persisted
/// rate (manual overrides included); only when nothing usable exists does a
/// lookup fail with `RateUnavailable`.
pub struct FxService {
    repository: Arc<FxRepository>,
    provider: Arc<dyn FxRateProvider>,
    cache: DashMap<String, CachedRate>,
    ttl: Duration,
}

impl FxService {
    /// Creates a new FxService instance with the default cache TTL
    pub fn new(repository: Arc<FxRepository>, provider: Arc<dyn FxRateProvider>) -> Self {
        Self::with_ttl(repository, provider, DEFAULT_RATE_TTL)
    }

    pub fn with_ttl(
        repository: Arc<FxRepository>,
        provider: Arc<dyn FxRateProvider>,
        ttl: Duration,
    ) -> Self {
        Self {
            repository,
            provider,
            cache: DashMap::new(),
            ttl,
        }
    }

    /// Latest usable rate for a pair, refreshing through the provider when
    /// the cached value has gone stale
    pub async fn get_latest_rate(&self, from: &str, to: &str) -> Result<Decimal> {
        validate_currency_code(from)?;
        validate_currency_code(to)?;

        if from == to {
            return Ok(Decimal::ONE);
        }

        let symbol = ExchangeRate::make_fx_symbol(from, to);

        if let Some(cached) = self.cache.get(&symbol) {
            let age = Utc::now() - cached.fetched_at;
            if age.to_std().map_or(false, |a| a <= self.ttl) {
                return Ok(cached.rate);
            }
        }

        match self.provider.fetch_rate(from, to).await {
            Ok(rate) => {
                if rate <= Decimal::ZERO {
                    return Err(FxError::InvalidRate(format!(
                        "{} returned non-positive rate for {}/{}",
                        self.provider.name(),
                        from,
                        to
                    )));
                }
                self.store_rate(from, to, rate, self.provider.name())?;
                Ok(rate)
            }
            Err(e) => {
                warn!(
                    "Rate provider {} failed for {}/{}: {}",
                    self.provider.name(),
                    from,
                    to,
                    e
                );
                self.fallback_rate(from, to, &symbol)
            }
        }
    }

    /// Converts an amount between currencies at the latest usable rate
    pub async fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal> {
        if from == to {
            return Ok(amount);
        }
        let rate = self.get_latest_rate(from, to).await?;
        Ok(amount * rate)
    }

    /// Records a user-supplied rate. Manual rates persist past the cache TTL
    /// and serve as the last fallback when the provider is down.
    pub fn set_manual_rate(&self, new_rate: NewExchangeRate) -> Result<ExchangeRate> {
        validate_currency_code(&new_rate.from_currency)?;
        validate_currency_code(&new_rate.to_currency)?;

        if new_rate.rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate(format!(
                "Manual rate for {}/{} must be positive",
                new_rate.from_currency, new_rate.to_currency
            )));
        }

        let rate = ExchangeRate {
            id: ExchangeRate::make_fx_symbol(&new_rate.from_currency, &new_rate.to_currency),
            from_currency: new_rate.from_currency,
            to_currency: new_rate.to_currency,
            rate: new_rate.rate,
            source: RATE_SOURCE_MANUAL.to_string(),
            timestamp: Utc::now().naive_utc(),
        };

        let saved = self.repository.save(rate)?;
        self.cache.insert(
            saved.id.clone(),
            CachedRate {
                rate: saved.rate,
                source: saved.source.clone(),
                fetched_at: Utc::now(),
            },
        );

        Ok(saved)
    }

    /// Lists all persisted rates
    pub fn get_rates(&self) -> Result<Vec<ExchangeRate>> {
        self.repository.list()
    }

    /// Removes a rate from both layers
    pub fn delete_rate(&self, rate_id: &str) -> Result<()> {
        self.repository.delete(rate_id)?;
        self.cache.remove(rate_id);
        Ok(())
    }

    fn store_rate(&self, from: &str, to: &str, rate: Decimal, source: &str) -> Result<()> {
        let record = ExchangeRate {
            id: ExchangeRate::make_fx_symbol(from, to),
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            rate,
            source: source.to_string(),
            timestamp: Utc::now().naive_utc(),
        };
        self.repository.save(record)?;

        self.cache.insert(
            ExchangeRate::make_fx_symbol(from, to),
            CachedRate {
                rate,
                source: source.to_string(),
                fetched_at: Utc::now(),
            },
        );
        Ok(())
    }

    /// Degraded lookup order once the provider has failed: stale cache,
    /// persisted pair, persisted inverse pair.
    fn fallback_rate(&self, from: &str, to: &str, symbol: &str) -> Result<Decimal> {
        if let Some(cached) = self.cache.get(symbol) {
            warn!(
                "Using stale cached rate for {}/{} from {}",
                from, to, cached.source
            );
            return Ok(cached.rate);
        }

        if let Some(persisted) = self.repository.get_by_pair(from, to)? {
            warn!(
                "Using persisted rate for {}/{} from {} ({})",
                from, to, persisted.source, persisted.timestamp
            );
            return Ok(persisted.rate);
        }

        let inverse_symbol = ExchangeRate::make_fx_symbol(to, from);
        if let Some(inverse) = self.repository.get_by_id(&inverse_symbol)? {
            if inverse.rate > Decimal::ZERO {
                warn!("Using inverted persisted rate for {}/{}", from, to);
                return Ok(Decimal::ONE / inverse.rate);
            }
        }

        Err(FxError::RateUnavailable(format!("{}/{}", from, to)))
    }
}

fn validate_currency_code(code: &str) -> Result<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FxError::InvalidCurrencyCode(code.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_currency_code;

    #[test]
    fn currency_codes_are_three_letters() {
        assert!(validate_currency_code("VND").is_ok());
        assert!(validate_currency_code("usd").is_ok());
        assert!(validate_currency_code("V1D").is_err());
        assert!(validate_currency_code("DONG").is_err());
        assert!(validate_currency_code("").is_err());
    }
}
