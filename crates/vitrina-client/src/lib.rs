pub mod client;
pub mod consultation;
pub mod error;
pub mod search;
pub mod types;

pub use client::ApiClient;
pub use consultation::{
    build_request, ConsultationError, ConsultationOutcome, ConsultationRequestBuilder,
};
pub use error::ClientError;
pub use search::{CatalogResults, CatalogSession};
pub use types::{ConsultationLine, ConsultationRequest, ProductInput, TaxonomyInput};
