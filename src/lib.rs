pub mod aggregate;
pub mod error;
pub(crate) mod filesystem;
pub mod hash;
pub mod manifest;
pub mod report;
pub mod runner;
pub mod strategy;

pub use crate::error::*;
pub use crate::runner::{Runner, SampleRecord, DEFAULT_BUFFER_CAPS};
pub use crate::strategy::{Strategy, STRATEGIES};
