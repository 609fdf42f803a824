//! Core table implementation.
//!
//! A fixed array of cache-padded buckets plus a padded entry counter. All
//! concurrency control lives in [`Bucket`]; this layer only routes keys to
//! buckets and tracks the entry count.

use core::fmt::Debug;
use core::fmt::DebugMap;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;
use core::mem::MaybeUninit;

use crossbeam_utils::CachePadded;

use crate::array::Array;
use crate::bucket::Bucket;
use crate::index::Concrete;
use crate::params::Params;
use crate::sync::atomic::AtomicU32;
use crate::sync::atomic::Ordering::Relaxed;

// -----------------------------------------------------------------------------
// Table State
// -----------------------------------------------------------------------------

#[repr(C)]
pub(crate) struct Table<P>
where
  P: Params + ?Sized,
{
  volatile: CachePadded<Volatile>,
  buckets: Array<CachePadded<Bucket>, P>,
}

impl<P> Table<P>
where
  P: Params + ?Sized,
{
  #[track_caller]
  #[inline]
  pub(crate) fn new() -> Self {
    Self {
      volatile: CachePadded::new(Volatile::new()),
      buckets: Array::new(|_, slot: &mut MaybeUninit<CachePadded<Bucket>>| {
        slot.write(CachePadded::new(Bucket::new()));
      }),
    }
  }

  #[track_caller]
  #[inline]
  pub(crate) const fn cap(&self) -> usize {
    P::LENGTH.as_usize()
  }

  #[track_caller]
  #[inline]
  pub(crate) fn len(&self) -> u32 {
    self.volatile.entries.load(Relaxed)
  }

  #[track_caller]
  #[inline]
  pub(crate) fn is_empty(&self) -> bool {
    self.len() == 0
  }

  #[track_caller]
  #[inline]
  pub(crate) fn insert(&self, key: &str, value: u32) {
    let index: Concrete<P> = Concrete::locate(key);

    if self.buckets.get(index).insert(key, value) {
      self.volatile.entries.fetch_add(1, Relaxed);
    }
  }

  #[track_caller]
  #[inline]
  pub(crate) fn read(&self, key: &str) -> Option<u32> {
    let index: Concrete<P> = Concrete::locate(key);

    match self.buckets.get(index).find(key) {
      Some(node) => Some(node.get()),
      None => None,
    }
  }

  #[track_caller]
  #[inline]
  pub(crate) fn exists(&self, key: &str) -> bool {
    let index: Concrete<P> = Concrete::locate(key);

    self.buckets.get(index).find(key).is_some()
  }
}

impl<P> Debug for Table<P>
where
  P: Params + ?Sized,
{
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    let mut debug: DebugMap<'_, '_> = f.debug_map();

    for bucket in self.buckets.as_slice() {
      bucket.each(|node| {
        debug.entry(&node.key(), &node.get());
      });
    }

    debug.finish()
  }
}

// -----------------------------------------------------------------------------
// Volatile State
// -----------------------------------------------------------------------------

/// Mutable table state modified during operations.
///
/// Isolated from the bucket array handle via cache padding to avoid false
/// sharing with the read path.
struct Volatile {
  /// Number of distinct keys currently in the table.
  ///
  /// Incremented only when a new node is linked; overwrites do not touch it.
  entries: AtomicU32,
}

impl Volatile {
  #[inline]
  fn new() -> Self {
    Self {
      entries: AtomicU32::new(0),
    }
  }
}
