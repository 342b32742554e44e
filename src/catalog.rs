//! In-memory catalog for one session and the query filter over it.

use crate::product::Product;

/// Products in feed order. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose title, brand or model contain `query` (case-insensitive), in feed order.
    pub fn filter(&self, query: &str) -> Vec<&Product> {
        filter(self.products.iter(), query)
    }
}

/// Substring filter over any sequence of products. An empty query keeps everything.
pub fn filter<'a, I>(products: I, query: &str) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let needle = query.to_lowercase();
    products.into_iter().filter(|p| p.matches(&needle)).collect()
}
