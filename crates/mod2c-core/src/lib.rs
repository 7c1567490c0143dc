//! Core data structures shared by the mod2c front-end and CLI.
//!
//! - `interner` / `pool` - the interned string pool backing all lexeme and
//!   identifier comparisons by handle equality
//! - `deplist` - ordered, deduplicated module dependency lists
//! - `colors` - ANSI palette for CLI output

pub mod colors;
pub mod deplist;
pub mod interner;
pub mod pool;

pub use colors::Colors;
pub use deplist::DependencyList;
pub use interner::{Interner, Symbol};
pub use pool::{Pool, PoolError};
