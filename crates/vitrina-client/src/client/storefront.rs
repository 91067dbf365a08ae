//! Public storefront endpoints: catalog reads and consultation submission.

use vitrina_core::{CatalogFilter, Category, Collection, Product, ProductPage};

use crate::error::ClientError;
use crate::types::ConsultationRequest;

use super::ApiClient;

impl ApiClient {
    /// Fetches one page of the product listing for `filter`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::UnexpectedStatus`] / [`ClientError::NotFound`] on a non-2xx status.
    /// - [`ClientError::Http`] on network or TLS failure.
    /// - [`ClientError::Deserialize`] if the body is not `{items, total}`.
    pub async fn list_products(
        &self,
        filter: &CatalogFilter,
        page_size: u32,
    ) -> Result<ProductPage, ClientError> {
        let mut url = self.endpoint(&["v1", "products"]);
        url.query_pairs_mut()
            .extend_pairs(filter.query_pairs(page_size));

        let request = self.client.get(url.clone());
        self.send_json(request, &url, "product listing").await
    }

    /// Fetches a single product for the detail view.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the API has no product with `id`,
    /// plus the same errors as [`ApiClient::list_products`].
    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        let url = self.endpoint(&["v1", "products", id]);
        let request = self.client.get(url.clone());
        self.send_json(request, &url, &format!("product {id}"))
            .await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::list_products`].
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let url = self.endpoint(&["v1", "categories"]);
        let request = self.client.get(url.clone());
        self.send_json(request, &url, "category list").await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::list_products`].
    pub async fn list_collections(&self) -> Result<Vec<Collection>, ClientError> {
        let url = self.endpoint(&["v1", "collections"]);
        let request = self.client.get(url.clone());
        self.send_json(request, &url, "collection list").await
    }

    /// Posts a consultation and returns the raw JSON response.
    ///
    /// The body is returned unparsed so the caller can decide what counts as
    /// a usable message.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::list_products`]; `Deserialize` only if the body
    /// is not JSON at all.
    pub async fn submit_consultation(
        &self,
        request: &ConsultationRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint(&["v1", "consultations"]);
        tracing::info!(items = request.items.len(), "submitting consultation");
        let builder = self.client.post(url.clone()).json(request);
        self.send_json(builder, &url, "consultation response").await
    }
}
