pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod signal;
pub mod tools;

pub use component::highlight_reel::{RunReport, process_files};
pub use error::{ReelError, Result};
