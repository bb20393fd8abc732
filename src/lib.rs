pub mod auth;
pub mod config;
pub mod database;
pub mod models;
pub mod startup;
pub mod utils;
pub mod web;

#[cfg(test)]
mod test_utils;

pub use utils::state;
