//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, endpoints and client.
//!
//! # Invariants
//! - Task identity (`id`) is owned by the client and never reassigned.
//! - The store-assigned `_id` is distinct from `id` and only used for
//!   update/delete addressing.

pub mod todo;
