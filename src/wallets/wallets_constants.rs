pub const WALLET_KIND_GENERAL: &str = "GENERAL";
pub const WALLET_KIND_INVESTMENT: &str = "INVESTMENT";

/// How many times an optimistic balance update is retried after losing a
/// version race before giving up.
pub const BALANCE_UPDATE_MAX_RETRIES: u32 = 5;
