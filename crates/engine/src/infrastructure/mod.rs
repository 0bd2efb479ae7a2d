//! Infrastructure implementations.
//!
//! Contains the catalog port and its adapters, plus engine configuration.

pub mod cache;
pub mod cached_catalog;
pub mod config;
pub mod dnd5e_api;
pub mod dnd5e_api_types;
pub mod ports;
