pub mod analyze;
pub mod config;
#[cfg(feature = "http")]
pub mod fetch;
mod report;

pub use report::{finish_session, Report};
