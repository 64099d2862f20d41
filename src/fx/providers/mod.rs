pub(crate) mod open_er_api_provider;

pub use open_er_api_provider::OpenErApiProvider;
