use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::models::{Category, NewCategory, Product, UNCATEGORIZED};

/// One column of the board: a category and the products filed under it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub products: Vec<&'a Product>,
}

/// A product reassignment applied locally, kept so it can be undone.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub product_id: String,
    pub from: String,
    pub to: String,
}

/// Local view of products and categories.
///
/// The `Uncategorized` column always exists and comes first. Products whose
/// category is not on the board are shown there.
#[derive(Debug, Clone, Default)]
pub struct CategoryBoard {
    products: Vec<Product>,
    categories: Vec<Category>,
}

impl CategoryBoard {
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products,
            categories,
        }
    }

    /// Load both lists from the backend.
    pub async fn load(client: &CatalogClient) -> Result<Self, CatalogError> {
        let products = client.list_products(None).await?;
        let categories = client.list_categories(None).await?;
        Ok(Self::new(products, categories))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn has_category(&self, id: &str) -> bool {
        id == UNCATEGORIZED || self.categories.iter().any(|c| c.id == id)
    }

    fn column_of<'a>(&self, product: &'a Product) -> &'a str {
        if self.has_category(&product.category) {
            product.category.as_str()
        } else {
            UNCATEGORIZED
        }
    }

    pub fn columns(&self) -> Vec<BoardColumn<'_>> {
        let mut columns = vec![BoardColumn {
            id: UNCATEGORIZED,
            title: UNCATEGORIZED,
            products: Vec::new(),
        }];
        columns.extend(self.categories.iter().map(|c| BoardColumn {
            id: c.id.as_str(),
            title: c.title.as_str(),
            products: Vec::new(),
        }));

        for product in &self.products {
            let target = self.column_of(product);
            if let Some(column) = columns.iter_mut().find(|c| c.id == target) {
                column.products.push(product);
            }
        }

        columns
    }

    /// Columns to show for a search query.
    ///
    /// An empty query shows everything. Otherwise a column is shown when its
    /// id or title matches, and its products are narrowed to the matching
    /// ones unless the column itself matched.
    pub fn visible_columns(&self, query: &str) -> Vec<BoardColumn<'_>> {
        let query = query.trim();
        if query.is_empty() {
            return self.columns();
        }
        let needle = query.to_lowercase();

        self.columns()
            .into_iter()
            .filter_map(|mut column| {
                let column_matches = column.id.to_lowercase().contains(&needle)
                    || column.title.to_lowercase().contains(&needle);
                if !column_matches {
                    column.products.retain(|p| p.matches(query));
                    if column.products.is_empty() {
                        return None;
                    }
                }
                Some(column)
            })
            .collect()
    }

    /// Optimistically file a product under another category.
    ///
    /// Returns `Ok(None)` when the product already sits in that column.
    pub fn move_product(&mut self, product_id: &str, to: &str) -> Result<Option<Move>, CatalogError> {
        if !self.has_category(to) {
            return Err(CatalogError::UnknownCategory(to.to_string()));
        }

        let index = self
            .products
            .iter()
            .position(|p| p.id.as_deref() == Some(product_id))
            .ok_or_else(|| CatalogError::UnknownProduct(product_id.to_string()))?;

        if self.column_of(&self.products[index]) == to {
            return Ok(None);
        }

        let product = &mut self.products[index];
        let from = std::mem::replace(&mut product.category, to.to_string());
        Ok(Some(Move {
            product_id: product_id.to_string(),
            from,
            to: to.to_string(),
        }))
    }

    /// Undo a move, provided the product has not been moved again since.
    pub fn revert(&mut self, mv: &Move) {
        if let Some(product) = self
            .products
            .iter_mut()
            .find(|p| p.id.as_deref() == Some(mv.product_id.as_str()) && p.category == mv.to)
        {
            product.category = mv.from.clone();
        }
    }

    /// Validate a new category name and add it locally.
    pub fn add_category(&mut self, name: &str) -> Result<NewCategory, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyCategoryName);
        }
        if self.has_category(name) {
            return Err(CatalogError::DuplicateCategory(name.to_string()));
        }

        let new = NewCategory::named(name);
        self.categories.push(Category {
            object_id: None,
            id: new.id.clone(),
            title: new.title.clone(),
        });
        Ok(new)
    }

    /// Drop a category; its products go back to `Uncategorized`.
    /// Returns how many products were reassigned.
    pub fn remove_category(&mut self, id: &str) -> Result<usize, CatalogError> {
        if id == UNCATEGORIZED {
            return Err(CatalogError::BuiltInCategory(id.to_string()));
        }
        self.categories.retain(|c| c.id != id);

        let mut reassigned = 0;
        for product in self.products.iter_mut().filter(|p| p.category == id) {
            product.category = UNCATEGORIZED.to_string();
            reassigned += 1;
        }
        Ok(reassigned)
    }
}

/// Move a product locally, persist it, and roll the local move back if the
/// backend refuses.
pub async fn reassign(
    client: &CatalogClient,
    board: &mut CategoryBoard,
    product_id: &str,
    to: &str,
) -> Result<Option<Move>, CatalogError> {
    let Some(mv) = board.move_product(product_id, to)? else {
        return Ok(None);
    };

    if let Err(e) = client.set_product_category(product_id, to).await {
        tracing::error!("Error updating product category: {}", e);
        board.revert(&mv);
        return Err(e);
    }

    Ok(Some(mv))
}

/// Add a category locally and on the backend.
///
/// On success the local entry is replaced by the row the backend stored; on
/// failure the local add is dropped.
pub async fn create_category(
    client: &CatalogClient,
    board: &mut CategoryBoard,
    name: &str,
) -> Result<Category, CatalogError> {
    let new = board.add_category(name)?;
    match client.create_category(&new).await {
        Ok(created) => {
            if let Some(local) = board.categories.iter_mut().find(|c| c.id == new.id) {
                *local = created.clone();
            }
            Ok(created)
        }
        Err(e) => {
            tracing::error!("Error creating category: {}", e);
            board.categories.retain(|c| c.id != new.id);
            Err(e)
        }
    }
}

/// Delete a category on the backend, then reflect it locally.
pub async fn delete_category(
    client: &CatalogClient,
    board: &mut CategoryBoard,
    id: &str,
) -> Result<usize, CatalogError> {
    if id == UNCATEGORIZED {
        return Err(CatalogError::BuiltInCategory(id.to_string()));
    }
    client.delete_category(id).await?;
    board.remove_category(id)
}
