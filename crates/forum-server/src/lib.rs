pub mod auth;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod repository;
pub mod resolver;
pub mod routes;

pub use config::Config;
pub use db::DbPool;
