// Modules
pub mod constants;
pub mod data;
pub mod errors;
pub mod explore;
pub mod histogram;
pub mod inference;
pub mod significance;
pub mod utils;

// Individual classes, and functions
pub use data::CustomerTable;
pub use explore::Chart;
pub use significance::{significance_checks, SignificanceReport};
