//! Client side of the inventory backend.
//!
//! Products resolved through the barcode lookup proxy are stored in a
//! persistence backend and grouped into user-defined categories. This crate
//! holds the typed models, an HTTP client for both services, the ingestion
//! flow, the category board that keeps local and server state in step, and
//! the backend's aggregate statistics.

pub mod board;
pub mod client;
pub mod error;
pub mod ingest;
pub mod models;

pub use board::{reassign, BoardColumn, CategoryBoard, Move};
pub use client::CatalogClient;
pub use error::{CatalogError, IngestError};
pub use ingest::ingest_barcode;
pub use models::{
    Category, CategoryCount, LookupResult, NewCategory, NewProduct, Product, ScannedProduct, Stats,
    TopCategory, UNCATEGORIZED,
};
