pub mod response;
pub mod session;

pub use response::{ApiResponse, ApiResult};
pub use session::{extract_session_token, session_token_middleware, SessionToken};
