use crate::error::CatalogError;
use crate::models::{Category, LookupResult, NewCategory, NewProduct, Product, Stats};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::json;
use url::Url;

/// HTTP client for the lookup proxy and the persistence backend.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    backend_url: String,
    proxy_url: String,
}

impl CatalogClient {
    pub fn new(backend_url: &str, proxy_url: &str) -> Result<Self, CatalogError> {
        Self::with_client(Client::new(), backend_url, proxy_url)
    }

    pub fn with_client(
        http: Client,
        backend_url: &str,
        proxy_url: &str,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            http,
            backend_url: normalize_base(backend_url)?,
            proxy_url: normalize_base(proxy_url)?,
        })
    }

    fn backend(&self, path: &str) -> String {
        format!("{}{}", self.backend_url, path)
    }

    /// Resolve a barcode through the lookup proxy (`GET {proxy}?barcode=`).
    pub async fn lookup(&self, barcode: &str) -> Result<LookupResult, CatalogError> {
        let request = self.http.get(&self.proxy_url).query(&[("barcode", barcode)]);
        let response = send(request, "Product lookup").await?;
        Ok(response.json().await?)
    }

    pub async fn list_products(&self, search: Option<&str>) -> Result<Vec<Product>, CatalogError> {
        let request = with_search(self.http.get(self.backend("/products")), search);
        let response = send(request, "Listing products").await?;
        Ok(response.json().await?)
    }

    /// A 400 from the backend means the barcode is already stored.
    pub async fn create_product(&self, product: &NewProduct) -> Result<(), CatalogError> {
        let response = self
            .http
            .post(self.backend("/products"))
            .json(product)
            .send()
            .await?;

        match response.status() {
            StatusCode::BAD_REQUEST => Err(CatalogError::AlreadyExists),
            status if status.is_success() => Ok(()),
            status => Err(CatalogError::Status {
                context: "Creating product",
                status,
            }),
        }
    }

    pub async fn set_product_category(
        &self,
        product_id: &str,
        category: &str,
    ) -> Result<(), CatalogError> {
        let request = self
            .http
            .patch(self.backend(&format!("/products/{}", product_id)))
            .json(&json!({ "category": category }));
        send(request, "Updating product category").await?;
        Ok(())
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<(), CatalogError> {
        let request = self
            .http
            .delete(self.backend(&format!("/products/{}", product_id)));
        send(request, "Deleting product").await?;
        Ok(())
    }

    pub async fn list_categories(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<Category>, CatalogError> {
        let request = with_search(self.http.get(self.backend("/categories")), search);
        let response = send(request, "Listing categories").await?;
        Ok(response.json().await?)
    }

    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, CatalogError> {
        let request = self.http.post(self.backend("/categories")).json(category);
        let response = send(request, "Creating category").await?;
        Ok(response.json().await?)
    }

    pub async fn delete_category(&self, category_id: &str) -> Result<(), CatalogError> {
        let request = self
            .http
            .delete(self.backend(&format!("/categories/{}", category_id)));
        send(request, "Deleting category").await?;
        Ok(())
    }

    /// Aggregate counts and the most recently added products.
    pub async fn stats(&self) -> Result<Stats, CatalogError> {
        let response = send(self.http.get(self.backend("/stats")), "Loading stats").await?;
        Ok(response.json().await?)
    }
}

fn normalize_base(raw: &str) -> Result<String, CatalogError> {
    Url::parse(raw).map_err(|_| CatalogError::InvalidUrl(raw.to_string()))?;
    Ok(raw.trim_end_matches('/').to_string())
}

fn with_search(request: RequestBuilder, search: Option<&str>) -> RequestBuilder {
    match search.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => request.query(&[("search", q)]),
        None => request,
    }
}

async fn send(request: RequestBuilder, context: &'static str) -> Result<Response, CatalogError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        tracing::error!("{} failed with status {}", context, status);
        return Err(CatalogError::Status { context, status });
    }
    Ok(response)
}
