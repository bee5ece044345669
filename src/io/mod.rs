//! I/O modules for dataset loading.

pub mod async_loader;
pub mod file_loader;

pub use async_loader::{AsyncLoader, LoadResult};
pub use file_loader::LoadingState;
