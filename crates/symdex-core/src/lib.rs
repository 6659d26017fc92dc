//! symdex-core: Shared types, errors, configuration and the file-I/O
//! contract for the symdex symbol index and refactoring engine.

pub mod config;
pub mod error;
pub mod fs;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::*;
pub use fs::{LocalFileSystem, MemoryFileSystem};
pub use traits::*;
pub use types::*;
