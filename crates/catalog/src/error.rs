use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid base URL '{0}'")]
    InvalidUrl(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{context} failed with status {status}")]
    Status {
        context: &'static str,
        status: StatusCode,
    },
    #[error("Product already exists in the database")]
    AlreadyExists,
    #[error("Product '{0}' not found on the board")]
    UnknownProduct(String),
    #[error("Category '{0}' does not exist")]
    UnknownCategory(String),
    #[error("Category name is required")]
    EmptyCategoryName,
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("Category '{0}' is built in and cannot be removed")]
    BuiltInCategory(String),
}

/// Why a scanned barcode did not end up in the backend.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Barcode is required")]
    EmptyBarcode,
    #[error("Product not found for barcode '{0}'")]
    NotFound(String),
    #[error("Product '{0}' already exists in the database")]
    Duplicate(String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
