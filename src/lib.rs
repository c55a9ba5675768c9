pub mod comment;
pub mod config;
pub mod db;
pub mod edge;
pub mod engagement;
pub mod error;
pub mod filesystem;
pub mod orm;
pub mod post;
pub mod profile;
pub mod relationship;
pub mod schema;
pub mod search;
pub mod web;

#[cfg(test)]
mod test_util;

pub use db::init_db;
pub use error::Error;
