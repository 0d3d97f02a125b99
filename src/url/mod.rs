//! URL handling module for RuBot
//!
//! This module provides URL canonicalization and host-key extraction. The
//! canonical string form of a URL is the identity used for deduplication,
//! and the host key selects the domain queue a link belongs to.

mod canonical;
mod host;

pub use canonical::canonicalize;
pub use host::host_key;
