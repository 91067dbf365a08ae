//! Bearer-authenticated admin CRUD endpoints under `/v1/admin`.

use reqwest::{Method, RequestBuilder, Url};

use vitrina_core::{Category, Collection, Product};

use crate::error::ClientError;
use crate::types::{ProductInput, TaxonomyInput};

use super::ApiClient;

impl ApiClient {
    /// Builds an authenticated admin request for `/v1/admin/<path...>`.
    pub(super) fn admin_request(
        &self,
        method: Method,
        path: &[&str],
    ) -> Result<(RequestBuilder, Url), ClientError> {
        let token = self
            .admin_token
            .as_deref()
            .ok_or(ClientError::MissingAdminToken)?;
        let mut segments = vec!["v1", "admin"];
        segments.extend_from_slice(path);
        let url = self.endpoint(&segments);
        let request = self.client.request(method, url.clone()).bearer_auth(token);
        Ok((request, url))
    }

    async fn admin_delete(&self, kind: &str, id: &str) -> Result<(), ClientError> {
        let (request, url) = self.admin_request(Method::DELETE, &[kind, id])?;
        self.send(request, &url).await?;
        tracing::info!(kind, id, "deleted");
        Ok(())
    }

    /// Lists every product, including ones hidden from the storefront.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingAdminToken`] if no token is set.
    /// - [`ClientError::Unauthorized`] if the API rejects the token.
    /// - Any transport, status or deserialization error.
    pub async fn admin_list_products(&self) -> Result<Vec<Product>, ClientError> {
        let (request, url) = self.admin_request(Method::GET, &["products"])?;
        self.send_json(request, &url, "admin product list").await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::admin_list_products`].
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ClientError> {
        let (request, url) = self.admin_request(Method::POST, &["products"])?;
        let product: Product = self
            .send_json(request.json(input), &url, "created product")
            .await?;
        tracing::info!(id = %product.id, "created product");
        Ok(product)
    }

    /// Replaces the product `id` with `input`.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotFound`] if `id` does not exist, plus the errors of
    /// [`ApiClient::admin_list_products`].
    pub async fn update_product(
        &self,
        id: &str,
        input: &ProductInput,
    ) -> Result<Product, ClientError> {
        let (request, url) = self.admin_request(Method::PUT, &["products", id])?;
        self.send_json(request.json(input), &url, &format!("updated product {id}"))
            .await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::update_product`].
    pub async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        self.admin_delete("products", id).await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::admin_list_products`].
    pub async fn create_category(&self, input: &TaxonomyInput) -> Result<Category, ClientError> {
        let (request, url) = self.admin_request(Method::POST, &["categories"])?;
        self.send_json(request.json(input), &url, "created category")
            .await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::update_product`].
    pub async fn update_category(
        &self,
        id: &str,
        input: &TaxonomyInput,
    ) -> Result<Category, ClientError> {
        let (request, url) = self.admin_request(Method::PUT, &["categories", id])?;
        self.send_json(request.json(input), &url, &format!("updated category {id}"))
            .await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::update_product`].
    pub async fn delete_category(&self, id: &str) -> Result<(), ClientError> {
        self.admin_delete("categories", id).await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::admin_list_products`].
    pub async fn create_collection(
        &self,
        input: &TaxonomyInput,
    ) -> Result<Collection, ClientError> {
        let (request, url) = self.admin_request(Method::POST, &["collections"])?;
        self.send_json(request.json(input), &url, "created collection")
            .await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::update_product`].
    pub async fn update_collection(
        &self,
        id: &str,
        input: &TaxonomyInput,
    ) -> Result<Collection, ClientError> {
        let (request, url) = self.admin_request(Method::PUT, &["collections", id])?;
        self.send_json(
            request.json(input),
            &url,
            &format!("updated collection {id}"),
        )
        .await
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::update_product`].
    pub async fn delete_collection(&self, id: &str) -> Result<(), ClientError> {
        self.admin_delete("collections", id).await
    }
}
