pub const ASSET_KIND_STOCK: &str = "STOCK";
pub const ASSET_KIND_FUND: &str = "FUND";
pub const ASSET_KIND_COMMODITY: &str = "COMMODITY";
pub const ASSET_KIND_OTHER: &str = "OTHER";
