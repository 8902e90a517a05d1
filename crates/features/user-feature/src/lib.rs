pub mod error;
pub mod password;
pub mod service;
pub mod session;

pub use error::UserFeatureError;
pub use service::{Credentials, UserService};
pub use session::SessionKeys;
