//! Document catalog and page rendering for docshelf.
//!
//! This crate provides:
//! - [`Site`]: navigation and page rendering over a staleness window
//! - [`NavigationList`]: the documents available for display
//! - Front matter parsing, identifier resolution and page composition
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use docshelf_site::{Site, SiteConfig};
//! use docshelf_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("docs")));
//! let site = Arc::new(Site::new(storage, SiteConfig::default()));
//!
//! for item in site.navigation().iter() {
//!     println!("{}", item.href());
//! }
//!
//! let page = site.render("getting-started")?;
//! println!("{}: {}", page.page.title, page.html);
//! # Ok(())
//! # }
//! ```

pub mod composer;
pub mod front_matter;
mod navigation;
mod page;
mod page_cache;
pub mod resolver;
mod site;

pub use front_matter::PageMetadata;
pub use navigation::{NavItem, NavigationList, scan};
pub use page::{DocumentEntry, PageBody, PageRenderResult, RenderError, RenderedPage};
pub use site::{Site, SiteConfig};

// Re-export for consumers that only depend on this crate
pub use docshelf_renderer::TocEntry;
pub use docshelf_storage::DocumentFormat;
