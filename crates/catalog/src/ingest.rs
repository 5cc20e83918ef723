use crate::client::CatalogClient;
use crate::error::{CatalogError, IngestError};
use crate::models::{NewProduct, Product};
use reqwest::StatusCode;

/// Resolve a scanned barcode and store the product as uncategorized.
///
/// `known` is the caller's current view of the backend; a barcode already in
/// it is rejected without a POST. The backend's own duplicate answer (400) is
/// reported the same way.
#[tracing::instrument(skip(client, known), fields(known_products = known.len()))]
pub async fn ingest_barcode(
    client: &CatalogClient,
    barcode: &str,
    known: &[Product],
) -> Result<Product, IngestError> {
    let barcode = barcode.trim();
    if barcode.is_empty() {
        return Err(IngestError::EmptyBarcode);
    }

    let result = match client.lookup(barcode).await {
        Ok(result) => result,
        Err(CatalogError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
            return Err(IngestError::NotFound(barcode.to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    let scanned = match result.product {
        Some(product) if result.status => product,
        _ => return Err(IngestError::NotFound(barcode.to_string())),
    };

    if known.iter().any(|p| p.barcode == scanned.barcode) {
        tracing::warn!("Product {} already exists, skipping", scanned.barcode);
        return Err(IngestError::Duplicate(scanned.barcode));
    }

    let new_product = NewProduct::from(scanned);
    match client.create_product(&new_product).await {
        Ok(()) => {
            tracing::info!("Product {} added", new_product.barcode);
            Ok(new_product.into_product())
        }
        Err(CatalogError::AlreadyExists) => Err(IngestError::Duplicate(new_product.barcode)),
        Err(e) => Err(e.into()),
    }
}
