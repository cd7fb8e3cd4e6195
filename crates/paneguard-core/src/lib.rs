#![forbid(unsafe_code)]

//! paneguard core vocabulary
//!
//! This crate defines the types the paneguard runtime and an embedding host
//! exchange, with no policy logic of its own:
//!
//! - [`ResourceId`] / [`RelevanceFilter`] - identity and relevance of the
//!   resources shown in editors
//! - [`HostEvent`] / [`EditorView`] / [`LineRange`] - snapshots the host
//!   pushes into the runtime
//! - [`HostCommand`] / [`HostConnection`] - the imperative command seam the
//!   runtime drives the host through
//!
//! # Role in paneguard
//! `paneguard-core` is the leaf crate: the runtime depends on it, hosts
//! implement [`HostConnection`] against it. It deliberately carries no
//! tracker or policy state so that embedders can construct and replay
//! snapshots without pulling in the decision machinery.

pub mod event;
pub mod host;
pub mod resource;

pub use event::{EditorView, HostEvent, LineRange};
pub use host::{HostCommand, HostConnection, HostError};
pub use resource::{RelevanceFilter, ResourceId};
