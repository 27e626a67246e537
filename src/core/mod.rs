//! Core translation engine module

pub mod backends;
pub mod catalog;
pub mod client;
pub mod config;
pub mod errors;
pub mod languages;
pub mod models;
pub mod prompt;

#[cfg(test)]
pub(crate) mod testing;
