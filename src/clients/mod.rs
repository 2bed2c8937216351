pub mod analyzer_client;
pub mod response;

pub use analyzer_client::{AnalyzerClient, Timeouts};
pub use response::handle_api_response;
