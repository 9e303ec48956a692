//! Resource registry for the Skroutz API.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

/// Top-level resources of the Skroutz API.
///
/// The first segment of every composed call must name one of these; the
/// variant maps to the base URI path the request is built from.
///
/// ## Examples
///
/// ```rust
/// use skroutz_client::Resource;
///
/// let resource = Resource::Product;
/// assert_eq!(resource.base_path(), "/products");
///
/// // Parse from a segment name
/// let parsed: Resource = "Sku".parse().unwrap();
/// assert_eq!(parsed, Resource::Sku);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum Resource {
    /// Search-as-you-type suggestions.
    Autocomplete,
    /// Product categories.
    Category,
    /// Content flags.
    Flag,
    /// Manufacturers.
    Manufacturer,
    /// Shop-specific product listings.
    Product,
    /// Full-text search.
    Search,
    /// Registered shops.
    Shop,
    /// Stock-keeping units (aggregated products).
    Sku,
}

impl Resource {
    /// Returns the base URI path requests for this resource start from.
    pub fn base_path(&self) -> &'static str {
        match self {
            Self::Autocomplete => "/autocomplete",
            Self::Category => "/categories",
            Self::Flag => "/flags",
            Self::Manufacturer => "/manufacturers",
            Self::Product => "/products",
            Self::Search => "/search",
            Self::Shop => "/shops",
            Self::Sku => "/skus",
        }
    }

    /// Looks a segment name up in the registry.
    ///
    /// Names match the variant spelling exactly (`"Product"`, `"Sku"`, ...).
    pub fn resolve(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }
}
