//! Shared models and parsing for the lanfind workspace.
//!
//! Everything here is synchronous and side-effect free apart from
//! [`network::interface`], which queries the operating system for the
//! local interface list.

pub mod config;
pub mod network;
