//! # Medley Resource Client
//!
//! Typed HTTP client for the Medley media-indexing backend.
//!
//! This crate is a pure transport boundary: each [`ResourceClient`]
//! operation issues exactly one network call against the versioned REST
//! API and returns either the decoded payload or a [`ClientError`]. It
//! performs no retries, no caching and no scheduling; those concerns
//! belong to the synchronization layer built on top of it.
//!
//! The concrete client is abstracted behind the [`ResourceClient`] trait
//! so tests (and the sync layer's test suite) can substitute a scripted
//! [`MockResourceClient`] without network access.

mod client;
mod error;
mod http;
mod mock;

pub use client::ResourceClient;
pub use error::{ClientError, ClientResult};
pub use http::{ClientConfig, HttpResourceClient};
pub use mock::{MockResourceClient, Script};
