pub mod authoring_api;
pub mod dashboard_api;
pub mod exam_display_api;
pub mod identity_api;
pub mod portal_client;

pub use portal_client::PortalClient;
