pub mod password;
pub mod service;
pub mod validate;

pub use service::AuthService;
