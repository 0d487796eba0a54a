mod result;
mod status;
pub mod views;

pub use result::ValidationResult;
pub use status::WeekStatus;

pub(crate) use result::{assemble, no_selections};
