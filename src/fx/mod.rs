pub(crate) mod fx_constants;
pub(crate) mod fx_errors;
pub(crate) mod fx_model;
pub(crate) mod fx_repository;
pub(crate) mod fx_service;
pub(crate) mod fx_traits;
pub mod providers;

pub use fx_constants::*;
pub use fx_errors::{FxError, Result};
pub use fx_model::{CachedRate, ExchangeRate, ExchangeRateDB, NewExchangeRate};
pub use fx_repository::FxRepository;
pub use fx_service::FxService;
pub use fx_traits::FxRateProvider;
