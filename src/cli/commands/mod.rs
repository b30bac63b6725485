pub mod asset;
pub mod auth;
pub mod dashboard;
pub mod db;
pub mod maintenance;
pub mod server;
