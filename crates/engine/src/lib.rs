//! Charforge engine library.
//!
//! Async side of character creation: fetches rules data from the catalog,
//! runs it through the domain choice normalizer and expands equipment
//! categories into concrete items.
//!
//! ## Structure
//!
//! - `use_cases/` - Character option orchestration, category expansion, concurrent loading
//! - `infrastructure/` - Catalog port, REST adapter, TTL cache, configuration
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
