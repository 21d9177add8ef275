//! LCAgents: layered resource resolution and agent definition loading.
//!
//! A project installs shared resources (tasks, templates, checklists, and the
//! rest) under a layer root, by default `.lcagents/`. The [`resource`] module
//! maps a logical `(type, name)` pair to one file, optionally honouring
//! custom/org/core override layers. The [`agent`] module parses, validates, and
//! caches the YAML agent definitions found there, and [`config`] owns the
//! project document that says where everything lives.

pub mod agent;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod logging;
pub mod resource;
pub mod tooling;
pub mod types;
