pub mod catalog_source;
pub mod quote_service;

pub use catalog_source::*;
pub use quote_service::*;
