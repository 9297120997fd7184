//! Search and filter pipeline for the unit palette.
//!
//! The catalog trait is the seam to the external search/filter service;
//! [`HttpCatalog`] talks to it and [`StaticCatalog`] stands in for it
//! offline.

mod catalog;
mod http;
mod pipeline;

pub use catalog::{demo_roster, normalize, CatalogFuture, StaticCatalog, UnitCatalog};
pub use http::{filter_params, HttpCatalog};
pub use pipeline::{SearchPipeline, SearchRequest, SearchState};
