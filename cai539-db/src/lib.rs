pub mod db;
pub mod lunar;
pub mod models;
pub mod repository;

pub use rusqlite;
