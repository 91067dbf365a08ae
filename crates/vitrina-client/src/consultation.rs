//! Cart checkout: turn the cart into a consultation, fetch the prefilled
//! WhatsApp message, and hand the deep link off.
//!
//! Any failure before the handoff leaves the cart untouched so the shopper
//! can retry. Once the link is dispatched the cart is cleared; there is no
//! confirmation from the messaging app, so clearing is never rolled back.

use thiserror::Error;

use vitrina_core::{
    dispatch_link, normalize_phone, whatsapp_link, CapabilityDetector, CartItem, CartStore,
    HandoffMode, LinkOpener,
};

use crate::client::ApiClient;
use crate::error::ClientError;
use crate::types::{ConsultationLine, ConsultationRequest};

/// Response field carrying the prefilled message.
const MESSAGE_FIELD: &str = "whatsappMessage";

#[derive(Debug, Error)]
pub enum ConsultationError {
    /// Required external configuration (the destination phone) is missing.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("cannot request a consultation for an empty cart")]
    EmptyCart,

    #[error("consultation request failed: {0}")]
    Network(#[from] ClientError),

    /// The API answered 2xx without a usable `whatsappMessage` string.
    #[error("consultation response did not include a message")]
    MissingMessage,
}

/// Result of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationOutcome {
    pub link: String,
    pub message: String,
    pub mode: HandoffMode,
    /// Number of cart lines that were submitted.
    pub items: usize,
}

/// Builds the request body for `items`, one `{productId, qty}` per line in
/// cart order.
///
/// # Errors
///
/// Returns [`ConsultationError::EmptyCart`] if `items` is empty.
pub fn build_request(items: &[CartItem]) -> Result<ConsultationRequest, ConsultationError> {
    if items.is_empty() {
        return Err(ConsultationError::EmptyCart);
    }
    Ok(ConsultationRequest {
        items: items
            .iter()
            .map(|item| ConsultationLine {
                product_id: item.product.id.clone(),
                qty: item.quantity.get(),
            })
            .collect(),
    })
}

/// Extracts a non-blank message string from a consultation response.
fn extract_message(body: &serde_json::Value) -> Option<String> {
    body.get(MESSAGE_FIELD)
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_owned)
}

/// Submits the cart as a consultation and hands the resulting deep link off.
///
/// The capability detector and link opener are injected so front ends (and
/// tests) decide how navigation actually happens.
pub struct ConsultationRequestBuilder<'a> {
    api: &'a ApiClient,
    phone: Option<String>,
    detector: &'a dyn CapabilityDetector,
    opener: &'a dyn LinkOpener,
}

impl<'a> ConsultationRequestBuilder<'a> {
    #[must_use]
    pub fn new(
        api: &'a ApiClient,
        phone: Option<&str>,
        detector: &'a dyn CapabilityDetector,
        opener: &'a dyn LinkOpener,
    ) -> Self {
        Self {
            api,
            phone: phone.map(str::to_owned),
            detector,
            opener,
        }
    }

    /// Returns the configured phone as digits, or a configuration error.
    fn phone_digits(&self) -> Result<String, ConsultationError> {
        let raw = self.phone.as_deref().ok_or_else(|| {
            ConsultationError::Configuration(
                "destination phone number is not configured (set VITRINA_WHATSAPP_PHONE)"
                    .to_owned(),
            )
        })?;
        let digits = normalize_phone(raw);
        if digits.is_empty() {
            return Err(ConsultationError::Configuration(format!(
                "destination phone number \"{raw}\" contains no digits"
            )));
        }
        Ok(digits)
    }

    /// Runs the checkout for `cart`.
    ///
    /// Validation happens before any network call: an empty cart or a
    /// missing phone number never reaches the API. On success the cart is
    /// cleared after the link has been dispatched.
    ///
    /// # Errors
    ///
    /// - [`ConsultationError::EmptyCart`] if the cart has no items.
    /// - [`ConsultationError::Configuration`] if no usable phone is configured.
    /// - [`ConsultationError::Network`] if the API call fails or answers
    ///   non-2xx.
    /// - [`ConsultationError::MissingMessage`] if a 2xx response is not JSON
    ///   or has no message.
    ///
    /// The cart is unchanged in every error case.
    pub async fn submit(
        &self,
        cart: &mut CartStore,
    ) -> Result<ConsultationOutcome, ConsultationError> {
        let request = build_request(cart.list())?;
        let phone = self.phone_digits()?;

        let body = match self.api.submit_consultation(&request).await {
            Ok(body) => body,
            // A 2xx whose body is not JSON (HTML, empty 204) carries no message.
            Err(ClientError::Deserialize { context, source }) => {
                tracing::warn!(%context, error = %source, "consultation response was not JSON");
                return Err(ConsultationError::MissingMessage);
            }
            Err(e) => return Err(e.into()),
        };
        let message = extract_message(&body).ok_or(ConsultationError::MissingMessage)?;

        let link = whatsapp_link(&phone, &message);
        let mode = dispatch_link(&link, self.detector, self.opener);
        tracing::info!(?mode, items = request.items.len(), "consultation handed off");

        cart.clear();

        Ok(ConsultationOutcome {
            link,
            message,
            mode,
            items: request.items.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use vitrina_core::Product;

    use super::*;

    fn item(id: &str, qty: u32) -> CartItem {
        CartItem {
            product: Product {
                id: id.to_owned(),
                name: id.to_uppercase(),
                description: None,
                category: None,
                collection: None,
                in_stock: true,
                image: None,
                price: None,
            },
            quantity: NonZeroU32::new(qty).unwrap(),
        }
    }

    #[test]
    fn build_request_keeps_cart_order_and_quantities() {
        let request = build_request(&[item("a", 1), item("b", 2)]).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"items": [{"productId": "a", "qty": 1}, {"productId": "b", "qty": 2}]})
        );
    }

    #[test]
    fn build_request_rejects_empty_cart() {
        assert!(matches!(build_request(&[]), Err(ConsultationError::EmptyCart)));
    }

    #[test]
    fn extract_message_requires_non_blank_string() {
        assert_eq!(
            extract_message(&serde_json::json!({"whatsappMessage": "Hola"})).as_deref(),
            Some("Hola")
        );
        assert!(extract_message(&serde_json::json!({})).is_none());
        assert!(extract_message(&serde_json::json!({"whatsappMessage": "  "})).is_none());
        assert!(extract_message(&serde_json::json!({"whatsappMessage": 42})).is_none());
        assert!(extract_message(&serde_json::json!({"whatsappMessage": null})).is_none());
    }
}
