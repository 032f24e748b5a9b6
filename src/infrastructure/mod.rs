pub mod http_executor;

pub use http_executor::{ApiRequest, ApiResponse, HttpExecutor, Method, Transport};
