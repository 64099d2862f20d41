use async_trait::async_trait;
use rust_decimal::Decimal;

use super::fx_errors::Result;

/// External quote source for currency pairs. Implementations apply their own
/// bounded request timeout; the service treats any error as "fall back to
/// cached or manual rates".
#[async_trait]
pub trait FxRateProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_rate(&self, from_currency: &str, to_currency: &str) -> Result<Decimal>;
}
