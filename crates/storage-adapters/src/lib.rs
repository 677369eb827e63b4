//! # storage-adapters
//!
//! Adapters implementing the `domains` ports. The shipped adapter is an
//! in-process document table that mirrors the managed store's behavior:
//! ordered indexed reads plus one optimistic transaction primitive used
//! for vote and registration commits.

pub mod memory;

pub use memory::MemoryStore;
