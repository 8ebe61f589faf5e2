//! Tiny Shop storefront library.
//!
//! A product grid fed by a remote catalog, and a cart kept in durable local
//! storage. The binary in `main.rs` wires these modules into an axum server;
//! exposing them as a library keeps them testable on their own.
//!
//! # Modules
//!
//! - [`catalog`] - remote catalog source, in-memory listing, one-shot loader
//! - [`cart`] - cart lines and the add/remove engine
//! - [`storage`] - `localStorage`-shaped durable key/value store
//! - [`store`] - [`store::Storefront`], the single owner of catalog and cart
//! - [`render`] - view projection and the action table
//! - [`routes`] - HTTP handlers and askama templates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod notify;
pub mod render;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;
