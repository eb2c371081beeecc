//! Shared infrastructure utilities for Math Master.
//!
//! Kept out of `mathmaster-types` and `mathmaster-core` so those crates stay
//! free of IO:
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename)

pub mod atomic_write;

pub use atomic_write::{FileSyncPolicy, atomic_write, atomic_write_with_policy, recover_bak_file};
