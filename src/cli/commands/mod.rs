//! Command implementations

mod circular;
mod missing;
mod plan;

pub use circular::circular;
pub use missing::missing;
pub use plan::plan;
