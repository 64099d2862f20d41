pub const TRANSACTION_KIND_INCOME: &str = "INCOME";
pub const TRANSACTION_KIND_EXPENSE: &str = "EXPENSE";
pub const TRANSACTION_KIND_TRANSFER_IN: &str = "TRANSFER_IN";
pub const TRANSACTION_KIND_TRANSFER_OUT: &str = "TRANSFER_OUT";
pub const TRANSACTION_KIND_BUY: &str = "BUY";
pub const TRANSACTION_KIND_SELL: &str = "SELL";
pub const TRANSACTION_KIND_DIVIDEND: &str = "DIVIDEND";
pub const TRANSACTION_KIND_ADJUSTMENT: &str = "ADJUSTMENT";
