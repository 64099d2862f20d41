use std::time::Duration;

pub const RATE_SOURCE_MANUAL: &str = "MANUAL";

/// How long a fetched rate stays fresh before the provider is asked again
pub const DEFAULT_RATE_TTL: Duration = Duration::from_secs(15 * 60);

/// Bounded timeout for external quote requests; on expiry we fall back to
/// cached or manual rates instead of blocking the operation.
pub const PROVIDER_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
