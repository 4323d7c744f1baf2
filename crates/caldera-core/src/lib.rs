pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod session;
pub mod testutil;
pub mod traits;
pub mod util;

pub use config::Credentials;
pub use error::AppError;
pub use service::HeatingService;
pub use session::Session;
pub use traits::HeatingApi;
