//! The Gear rolling-hash table.
//!
//! A fixed 256-entry table of 64-bit values, generated once at build time
//! from a pinned seed (see `build.rs`). Gear, FastCDC, and TTTD (via its
//! Rabin fallback) all roll the same table; its values are a portable
//! constant of the chunking engine and must not vary between runs.

include!(concat!(env!("OUT_DIR"), "/gear_table.rs"));
