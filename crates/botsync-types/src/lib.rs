//! Shared domain types for botsync.
//!
//! This crate contains the two views of a bot definition: the spec side
//! (what the YAML sync file declares) and the wire side (what the
//! model-building service sends and receives), plus the error enums and the
//! tool settings.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod error;
pub mod remote;
pub mod settings;
pub mod spec;
