//! Request bodies sent to the storefront API.
//!
//! Response shapes live in `vitrina_core::products`; only the write-side
//! payloads are defined here.

use rust_decimal::Decimal;
use serde::Serialize;

/// One line of a consultation: `{productId, qty}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationLine {
    pub product_id: String,
    pub qty: u32,
}

/// Body of `POST /v1/consultations`: `{items: [{productId, qty}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsultationRequest {
    pub items: Vec<ConsultationLine>,
}

/// Body of the admin product create/update endpoints.
///
/// Updates replace the whole record, so unset optional fields are sent as
/// `null` rather than omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub collection: Option<String>,
    pub in_stock: bool,
    pub image: Option<String>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub price: Option<Decimal>,
}

/// Body of the admin category/collection create/update endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyInput {
    pub name: String,
    pub slug: String,
    /// Owning collection slug. Only meaningful for categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}
