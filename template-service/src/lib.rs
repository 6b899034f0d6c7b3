//! Conversation-template catalog and the pure operations over it.
//!
//! A template is a named, reusable prompt skeleton with typed, optionally
//! required fill-in parameters referenced as `{name}` placeholders. The
//! catalog is parsed once from bundled JSON at startup and is immutable
//! afterwards; construct it explicitly and pass it where it is needed rather
//! than relying on ambient globals.
//!
//! Parameter validation and prompt rendering live in [`render`]. There is a
//! single rendering implementation; the HTTP relay calls the same function a
//! local caller would, so the two cannot drift apart.

pub mod catalog;
pub mod render;

pub use catalog::{CatalogError, ParameterKind, Template, TemplateCatalog, TemplateParameter};
pub use render::{ParameterValidation, TemplateError, render_prompt, validate_parameters};
