use serde::{Deserialize, Deserializer, Serialize};

/// Category every product starts in and falls back to.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A product as stored by the persistence backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    pub barcode: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "uncategorized", deserialize_with = "category_or_default")]
    pub category: String,
}

impl Product {
    /// Case-insensitive match of `needle` against the descriptive fields.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [
            Some(self.barcode.as_str()),
            self.material.as_deref(),
            self.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

fn uncategorized() -> String {
    UNCATEGORIZED.to_string()
}

fn category_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .filter(|c| !c.is_empty())
        .unwrap_or_else(uncategorized))
}

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub material: Option<String>,
    pub barcode: String,
    pub description: Option<String>,
    pub category: String,
}

impl NewProduct {
    pub fn into_product(self) -> Product {
        Product {
            id: None,
            material: self.material,
            barcode: self.barcode,
            description: self.description,
            category: self.category,
        }
    }
}

impl From<ScannedProduct> for NewProduct {
    fn from(scanned: ScannedProduct) -> Self {
        Self {
            material: scanned.material,
            barcode: scanned.barcode,
            description: scanned.description,
            category: uncategorized(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// User-facing key; products refer to categories by this value.
    pub id: String,
    pub title: String,
}

/// Body of `POST /categories`. Id and title are both the entered name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub id: String,
    pub title: String,
}

impl NewCategory {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            title: name,
        }
    }
}

/// Product payload answered by the lookup proxy on success.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LookupResult {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub product: Option<ScannedProduct>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScannedProduct {
    #[serde(default)]
    pub material: Option<String>,
    pub barcode: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Aggregate figures served by `GET /stats`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub num_products: u64,
    #[serde(default)]
    pub num_categories: u64,
    #[serde(default)]
    pub products_per_category: Vec<CategoryCount>,
    #[serde(default)]
    pub top_categories: Vec<TopCategory>,
    #[serde(default)]
    pub recently_added_products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Grouping row; `_id` is the category the products were grouped under.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopCategory {
    #[serde(rename = "_id", default)]
    pub category: Option<String>,
    pub count: u64,
}
