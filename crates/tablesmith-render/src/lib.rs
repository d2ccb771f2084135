//! Source artifact rendering for tablesmith.
//!
//! Every table yields three Rust files: a serde data-transfer shape, an
//! entity with constructor and `Display`, and a data-access module built on
//! `sqlx`. Rendering is pure; [`ArtifactWriter`] puts the text on disk.

pub mod dao;
pub mod entity;
pub mod errors;
mod layout;
pub mod shape;
pub mod writer;

pub use dao::render_dao;
pub use entity::render_entity;
pub use errors::RenderError;
pub use shape::render_shape;
pub use writer::{ArtifactKind, ArtifactWriter};
