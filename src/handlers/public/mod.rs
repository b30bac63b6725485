// handlers/public/mod.rs - endpoints reachable without a token
pub mod auth;
pub mod health;

pub use auth::login as auth_login;
pub use auth::register as auth_register;
pub use health::health;
