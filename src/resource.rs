//! Resource Resolution
//!
//! Translates a logical `(type, name)` pair into exactly one file in the
//! layered resource tree and exposes listing, structural validation, and
//! permission inspection over the same namespace. Resolution is stateless:
//! nothing is cached, so edits between calls are always observed.

pub mod layers;
pub mod permissions;
pub mod resolution;
pub mod resolver;

pub use layers::{LayeredEntry, LayeredResolution};
pub use permissions::{check_permissions, PermissionReport};
pub use resolution::{MissCause, ResolutionResult};
pub use resolver::{FsResourceResolver, ResourceHealthReport, ResourceResolver};
