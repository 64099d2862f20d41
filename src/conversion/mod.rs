pub(crate) mod conversion_errors;
pub(crate) mod conversion_model;
pub(crate) mod conversion_service;

pub use conversion_errors::{ConversionError, Result};
pub use conversion_model::{convert_quantity, ConvertedValue, PhysicalUnit};
pub use conversion_service::ConversionService;
