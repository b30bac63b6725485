// handlers/protected/mod.rs - endpoints behind jwt_auth_middleware
//
// Every handler receives the caller as `AuthUser`; asset queries are scoped
// to that user and maintenance records are checked against their asset's owner.
pub mod assets;
pub mod auth;
pub mod dashboard;
pub mod maintenance;
pub mod utils;

pub use auth::whoami as auth_whoami;

pub use assets::create as asset_create;
pub use assets::delete as asset_delete;
pub use assets::get as asset_get;
pub use assets::list as asset_list;
pub use assets::update as asset_update;

pub use maintenance::create as maintenance_create;
pub use maintenance::delete as maintenance_delete;
pub use maintenance::get as maintenance_get;
pub use maintenance::list as maintenance_list;
pub use maintenance::update as maintenance_update;

pub use dashboard::upcoming as dashboard_upcoming;
