//! A literate-programming tangler.
//!
//! Given one or more org documents — prose interleaved with named,
//! cross-referencing `#+BEGIN_SRC`/`#+END_SRC` code blocks — this crate
//! extracts the named blocks, resolves `<<name>>` references between them
//! (forward or backward, within a document or across documents), and
//! recursively expands each `:tangle <path>`-bound root block into its
//! output file.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::path::Path;
//! use worg::buffer::DocumentArena;
//! use worg::config::Config;
//! use worg::engine::Tangler;
//! use worg::registry::BlockArena;
//!
//! let documents = DocumentArena::new();
//! let blocks = BlockArena::new();
//! let buf = documents.load_file(Path::new("recipe.org"))?;
//!
//! let mut tangler = Tangler::new(&blocks, Config::new());
//! tangler.run(std::iter::once(buf))?;
//! for diagnostic in tangler.diagnostics() {
//!     eprintln!("{}", diagnostic.plain_message());
//! }
//! # Ok::<(), worg::error::TangleError>(())
//! ```
//!
//! ## Module map
//!
//! The core engine — the part an implementer must get bit-for-bit right —
//! lives in [`view`], [`buffer`], [`segment`], [`block`], [`registry`],
//! [`filelist`], [`parser`], [`tangle`], [`usage`], and [`codemap`]. The
//! ambient stack around it — [`config`], [`diag`], [`error`], and the
//! [`engine`] facade that ties everything together — carries the run-wide
//! flags, diagnostic rendering, and error type a complete crate needs.

pub mod block;
pub mod buffer;
pub mod codemap;
pub mod config;
pub mod diag;
pub mod engine;
pub mod error;
pub mod filelist;
pub mod parser;
pub mod registry;
pub mod segment;
pub mod tangle;
pub mod usage;
pub mod view;

pub use config::{Config, WarningsPolicy};
pub use engine::Tangler;
pub use error::{Result, TangleError};
