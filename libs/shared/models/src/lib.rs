pub mod api;
pub mod error;
pub mod status;
pub mod user;

pub use api::*;
pub use error::*;
pub use status::*;
pub use user::*;
