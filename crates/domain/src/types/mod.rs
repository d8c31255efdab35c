//! Domain types and models

pub mod api_error;
pub mod client;
pub mod projection;
pub mod remote;
pub mod tenancy;

pub use api_error::{ApiError, ClassifiedError};
pub use client::{email_domain, normalize_email, ClientName, DomainName};
pub use projection::{FieldPath, ProjectionSpec};
pub use remote::{FailureHint, RemoteFailure};
pub use tenancy::TenantResolutionInput;
