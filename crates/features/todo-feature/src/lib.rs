pub mod error;
pub mod input;
pub mod photo;
pub mod service;

pub use error::TodoFeatureError;
pub use input::{Field, PhotoUpload, TodoInput};
pub use photo::PhotoStore;
pub use service::TodoService;
