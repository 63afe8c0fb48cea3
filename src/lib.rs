//! Motormart client library
//!
//! Typed access to the marketplace GraphQL gateway: sealed request payloads,
//! per-entity repositories writing into a shared slice store, session
//! handling and the multi-step listing wizard.

pub mod actions;
pub mod client;
pub mod codec;
pub mod config;
pub mod entities;
pub mod error;
pub mod gateway;
pub mod models;
pub mod notify;
pub mod repository;
pub mod session;
pub mod storage;
pub mod store;
pub mod wizard;

pub use client::MarketClient;
pub use error::{ClientError, ClientResult};
