// handlers/mod.rs - two security tiers
//
// Public (no auth): health, register, login
// Protected (JWT auth): whoami, assets, maintenance, dashboard
pub mod protected;
pub mod public;
