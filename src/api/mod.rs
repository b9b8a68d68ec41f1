pub mod client;
pub mod error;
pub mod interceptors;
pub mod request;
pub mod transport;

pub use client::{ApiClient, ApiResult};
pub use error::{ApiError, FailureKind};
pub use interceptors::{attach_auth, handle_response, invalidate};
pub use request::{ApiRequest, ApiResponse};
pub use transport::{ReqwestTransport, ScriptedTransport, Transport};
