//! Product browsing and search over the cached catalogue.

use chrono::Weekday;

use super::{Category, Product};

/// Filters applied by the browse and search views.
///
/// Unset filters match everything. Matching products keep store order.
///
/// # Examples
/// ```
/// use client::domain::{Category, ProductSearch};
///
/// let search = ProductSearch::text("projector").with_category(Category::Equipment);
/// assert!(!search.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSearch {
    /// Case-insensitive text matched against name and description.
    pub text: Option<String>,
    /// Required product kind.
    pub category: Option<Category>,
    /// Weekday the product must be available on.
    pub weekday: Option<Weekday>,
    /// Inclusive price ceiling in cents.
    pub max_price_cents: Option<u64>,
}

impl ProductSearch {
    /// Search by free text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Restrict to one category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict to products available on `weekday`.
    #[must_use]
    pub fn with_weekday(mut self, weekday: Weekday) -> Self {
        self.weekday = Some(weekday);
        self
    }

    /// Restrict to products costing at most `max_price_cents`.
    #[must_use]
    pub fn with_max_price(mut self, max_price_cents: u64) -> Self {
        self.max_price_cents = Some(max_price_cents);
        self
    }

    /// Whether no filter is set.
    pub fn is_empty(&self) -> bool {
        self.needle().is_none()
            && self.category.is_none()
            && self.weekday.is_none()
            && self.max_price_cents.is_none()
    }

    /// Whether `product` passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category
            && product.category != category
        {
            return false;
        }
        if let Some(weekday) = self.weekday
            && !product.is_available_on(weekday)
        {
            return false;
        }
        if let Some(max) = self.max_price_cents
            && product.price.amount_cents > max
        {
            return false;
        }
        match self.needle() {
            Some(needle) => {
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    /// Products from `products` passing every filter, in their given order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products
            .iter()
            .filter(|product| self.matches(product))
            .collect()
    }

    fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }
}
