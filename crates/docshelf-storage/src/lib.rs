//! Storage abstraction for the docshelf documentation server.
//!
//! This crate provides a [`Storage`] trait that hides where documents live.
//! The site layer only ever asks for three things: which document files
//! exist, what bytes a file holds, and when it last changed.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `scan()`, `read()`, `exists()` and `mtime()` methods
//! - [`FsStorage`] for a single flat directory on the local filesystem
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use docshelf_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for file in storage.scan()? {
//!     println!("{} -> /docs/{}", file.file_name, file.slug);
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{DocumentFile, DocumentFormat, Storage, StorageError, StorageErrorKind};
