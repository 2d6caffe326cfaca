//! # dwg-decode
//!
//! A pure Rust reader for binary DWG drawing files.
//!
//! The crate decodes a DWG byte buffer into a typed, linked
//! [`DocumentGraph`]: every object the file's object map lists becomes one
//! table row, handles between objects are resolved to arena indices, and
//! per-object decode failures are isolated so one malformed entity never
//! hides the rest of the drawing.
//!
//! Supported revisions are the classic section-locator container: R13/R14
//! (`AC1012`/`AC1014`) and R2000 (`AC1015`). Later revisions are recognized
//! and rejected with [`DecodeError::UnsupportedVersion`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let data = std::fs::read("drawing.dwg")?;
//! let graph = dwg_decode::decode(&data)?;
//!
//! for object in &graph.objects {
//!     println!("{} {:#x}", object.variant.name(), object.header.handle);
//! }
//! # Ok::<(), dwg_decode::DecodeError>(())
//! ```

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bit;
pub mod decoder;
pub mod document;
pub mod entities;
pub mod error;
pub mod notification;
pub mod objects;
pub mod types;

pub use decoder::{decode, decode_with_options, DecodeOptions};
pub use document::{
    DocumentGraph, DwgClass, DwgObject, ObjectHeader, ObjectRef, ObjectVariant,
};
pub use error::{DecodeError, Result};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use types::{Color, FileVersion, Handle, Transparency, Vector2, Vector3};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
