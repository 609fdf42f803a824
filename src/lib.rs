//! A fixed-capacity concurrent string map with per-bucket lock striping.
//!
//! `htab` provides [`HTab`], a map from string keys to `u32` values backed
//! by a fixed array of buckets, each guarded by its own lock. Writers
//! touching different buckets proceed fully in parallel; lookups take no
//! lock at all. It is optimized for insert-heavy multi-threaded workloads
//! over a known key universe.
//!
//! # Overview
//!
//! Every key hashes to one of `capacity()` buckets; colliding keys chain
//! within their bucket. The bucket array is allocated once and never
//! resized, so bucket references need no synchronization. Only each
//! bucket's chain does, and that is what the bucket lock protects.
//!
//! Entries are never removed individually: a key, once inserted, stays
//! until the table is dropped. Re-inserting a key overwrites its value in
//! place.
//!
//! # Usage
//!
//! ```
//! use htab::HTab;
//!
//! let table: HTab = HTab::new();
//!
//! table.insert("alice", 1);
//! table.insert("bob", 2);
//! table.insert("alice", 3);
//!
//! assert!(table.exists("alice"));
//! assert_eq!(table.value("alice"), 3);
//! assert!(!table.exists("carol"));
//! ```
//!
//! # Configuration
//!
//! The bucket count is configured at compile time through the [`Params`]
//! trait. The default configuration ([`DefaultParams`]) provides
//! [`Capacity::DEF`] buckets:
//!
//! ```
//! use htab::{HTab, DefaultParams};
//!
//! // These are equivalent:
//! let table1: HTab = HTab::new();
//! let table2: HTab<DefaultParams> = HTab::new();
//! ```
//!
//! For custom capacities, use [`ConstParams`]:
//!
//! ```
//! use htab::{HTab, ConstParams};
//!
//! let table: HTab<ConstParams<512>> = HTab::new();
//! assert_eq!(table.capacity(), 512);
//! ```
//!
//! Capacity is always rounded up to the nearest power of two and clamped
//! to the range <code>[Capacity::MIN]..=[Capacity::MAX]</code>.
//!
//! # Concurrency
//!
//! All operations on [`HTab`] are thread-safe. Inserts serialize only when
//! they target the same bucket, and then only around the chain splice
//! itself; key scanning and entry allocation happen outside the critical
//! section. [`HTab::read`] and [`HTab::exists`] are lock-free: the chain
//! head is an atomic pointer published with release ordering, so a reader
//! either sees an entry completely or not at all.
//!
//! ```no_run
//! use htab::{HTab, ConstParams};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let table: Arc<HTab<ConstParams<1024>>> = Arc::new(HTab::new());
//!
//! let handles: Vec<_> = (0..4)
//!   .map(|thread_id| {
//!     let table = Arc::clone(&table);
//!     thread::spawn(move || {
//!       for i in 0..100 {
//!         table.insert(&format!("key-{thread_id}-{i}"), i);
//!       }
//!     })
//!   })
//!   .collect();
//!
//! for handle in handles {
//!   handle.join().unwrap();
//! }
//!
//! assert_eq!(table.len(), 400);
//! ```
//!
//! ## Consistency
//!
//! Concurrent inserts of the *same* key are safe: value overwrites are
//! atomic last-writer-wins, and a writer that must link a new entry
//! re-checks, under the bucket lock, the chain prefix published since its
//! unlocked scan, so a key never occupies two chain entries. See the
//! [implementation notes][implementation] for the full argument.
//!
//! # Teardown
//!
//! Dropping the table frees every entry and every lock in one pass. Rust's
//! ownership rules enforce the quiescence the teardown requires: `Drop`
//! takes `&mut self`, so no concurrent reader or writer can exist.
//!
//! # Capacity Limits
//!
//! Capacity is bounded by [`Capacity::MIN`] and [`Capacity::MAX`]. The
//! default is [`Capacity::DEF`]. The capacity bounds only the bucket
//! count, not the entry count; long chains degrade lookups to linear scans
//! but never fail.
//!
//! [Capacity::MAX]: crate::config::Capacity::MAX
//! [Capacity::MIN]: crate::config::Capacity::MIN
//! [`HTab::read`]: crate::public::HTab::read
//! [`HTab::exists`]: crate::public::HTab::exists
//! [`Capacity::DEF`]: crate::config::Capacity::DEF
//! [`Capacity::MAX`]: crate::config::Capacity::MAX
//! [`Capacity::MIN`]: crate::config::Capacity::MIN
//! [`ConstParams`]: crate::config::ConstParams
//! [`DefaultParams`]: crate::config::DefaultParams
//! [`Params`]: crate::config::Params
//! [implementation]: crate::implementation
//!

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod array;
mod bucket;
mod hash;
mod index;
mod params;
mod public;
mod table;
mod utils;

#[cfg(test)]
mod tests;

pub(crate) use crate::utils::alloc;
pub(crate) use crate::utils::sync;

pub mod implementation {
  #![doc = include_str!("../IMPLEMENTATION.md")]
}

pub mod config {
  //! Configuration parameters which can be used to override the default table
  //! settings.

  pub use crate::params::CACHE_LINE;
  pub use crate::params::Capacity;
  pub use crate::params::ConstParams;
  pub use crate::params::DebugParams;
  pub use crate::params::DefaultParams;
  pub use crate::params::Params;
  pub use crate::params::ParamsExt;
}

#[doc(inline)]
pub use self::config::Capacity;

#[doc(inline)]
pub use self::config::ConstParams;

#[doc(inline)]
pub use self::config::DefaultParams;

#[doc(inline)]
pub use self::config::Params;

#[doc(inline)]
pub use self::config::ParamsExt;

pub use self::public::HTab;
