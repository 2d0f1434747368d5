//! Fixed-grammar parsers for config parameter default values. These are
//! pure functions, deliberately not delegated to a locale-aware config
//! library; see `DESIGN.md` for the reasoning.

pub mod duration;
pub mod memory_size;

pub use duration::parse_duration;
pub use memory_size::parse_memory_size;
