//! mockblock - A filesystem-backed mock block store
//!
//! Emulates a remote object store on the local filesystem so that caching,
//! retry and consistency layers can be exercised without network calls.

pub mod cli;
pub mod crash_point;
pub mod observability;
pub mod store;
