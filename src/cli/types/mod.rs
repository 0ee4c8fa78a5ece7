//! Type-safe wrappers for command-line values.

pub mod ids;
pub mod time;

pub use ids::TeamNumber;
pub use time::Season;
