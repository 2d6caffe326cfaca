//! Core value types shared across the decoder.

pub mod color;
pub mod handle;
pub mod vector;
pub mod version;

pub use color::{Color, Transparency};
pub use handle::Handle;
pub use vector::{Vector2, Vector3};
pub use version::FileVersion;
