pub mod analyze;
pub mod cli;
pub mod confirm;
pub mod error;
pub mod model;
pub mod preview;
pub mod schedule;
pub mod study;
pub mod util;
pub mod vcs;

pub use error::{Result, StudyError};
