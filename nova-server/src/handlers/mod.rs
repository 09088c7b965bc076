pub mod anime;
pub mod auth;
pub mod browse;
pub mod health;
pub mod metadata;
pub mod sports;
