//! Core types and trait definitions for the GeekTunes catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it. It also ships [`memory::MemStore`], the
//! in-memory reference implementation of [`store::CatalogStore`].

// Trait methods spell out `Send` futures; impls use plain `async fn`.
#![allow(async_fn_in_trait)]

pub mod artist;
pub mod chat;
pub mod error;
pub mod memory;
pub mod notification;
pub mod project;
pub mod store;
pub mod user;

pub use error::{Error, Result};
