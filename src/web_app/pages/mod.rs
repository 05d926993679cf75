// web_app/pages/mod.rs - Page components module
//
// This module contains page-level Leptos components:
// - AddProductPage: Administrative form for adding a product to the catalog

pub mod add_product;

// Re-export page components
pub use add_product::AddProductPage;
