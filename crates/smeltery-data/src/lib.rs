//! Data-file loading for the smeltery registry.
//!
//! Item, recipe, and fuel definitions live in RON, JSON, or TOML files and
//! are resolved by name into a built [`smeltery_core::registry::Registry`].

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, GameData, load_game_data};
