pub mod client;
pub mod models;
pub mod runner;

pub use client::{CobaltClient, CobaltError};
pub use models::{CobaltConfig, FormatDescriptor};
pub use runner::{CommandRunner, SystemRunner};
