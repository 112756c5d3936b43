//! Artifact content handling for relay
//!
//! - [`artifact`]: the in-memory artifact model and artifact kinds
//! - [`frontmatter`]: header parsing and rendering
//! - [`discovery`]: scanning a source tree for artifacts
//! - [`template`]: the `{{.var}}` / `{{if}}` template engine
//! - [`manifest`]: the published list of artifacts in a source tree

pub mod artifact;
pub mod discovery;
pub mod error;
pub mod frontmatter;
pub mod manifest;
pub mod template;

pub use artifact::{Artifact, ArtifactKind, Metadata};
pub use discovery::discover;
pub use error::{Error, Result};
pub use manifest::SourceManifest;
pub use template::{Template, render};
