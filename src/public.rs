use core::fmt::Debug;
use core::fmt::Formatter;
use core::fmt::Result;
use core::panic::RefUnwindSafe;
use core::panic::UnwindSafe;

use crate::params::DefaultParams;
use crate::params::Params;
use crate::params::ParamsExt;
use crate::table::Table;

/// A fixed-capacity concurrent map from string keys to `u32` values.
///
/// `HTab` hashes each key to one of a fixed number of buckets and guards
/// each bucket with its own lock, so writers targeting different buckets
/// never serialize against each other. Lookups take no lock at all.
///
/// See the [crate-level documentation][crate] for an overview and examples.
///
/// # Type Parameters
///
/// - `P`: Configuration parameters implementing [`Params`]. Defaults to
///   [`DefaultParams`] (4,096 buckets).
///
/// # Examples
///
/// Basic usage with default configuration:
///
/// ```
/// use htab::HTab;
///
/// let table: HTab = HTab::new();
///
/// table.insert("alice", 1);
/// assert_eq!(table.read("alice"), Some(1));
/// ```
///
/// Custom capacity using [`ConstParams`]:
///
/// ```
/// use htab::{HTab, ConstParams};
///
/// let table: HTab<ConstParams<256>> = HTab::new();
/// assert_eq!(table.capacity(), 256);
/// ```
///
/// [`ConstParams`]: crate::ConstParams
#[repr(transparent)]
pub struct HTab<P = DefaultParams>
where
  P: Params + ?Sized,
{
  inner: Table<P>,
}

impl<P> HTab<P>
where
  P: Params + ?Sized,
{
  /// Creates a new, empty table.
  ///
  /// All buckets are allocated and initialized up front; the table never
  /// grows or rehashes afterwards. Allocation failure aborts the process.
  ///
  /// # Examples
  ///
  /// ```
  /// use htab::HTab;
  ///
  /// let table: HTab = HTab::new();
  /// assert!(table.is_empty());
  /// ```
  #[inline]
  pub fn new() -> Self {
    Self {
      inner: Table::new(),
    }
  }

  /// Returns the number of buckets in the table.
  ///
  /// This value is determined by the [`Params::LENGTH`] configuration and
  /// is fixed for the lifetime of the table. It does not bound the number
  /// of entries: buckets chain colliding keys.
  ///
  /// # Examples
  ///
  /// ```
  /// use htab::{HTab, ConstParams};
  ///
  /// let table: HTab<ConstParams<512>> = HTab::new();
  /// assert_eq!(table.capacity(), 512);
  /// ```
  #[inline]
  pub const fn capacity(&self) -> usize {
    self.inner.cap()
  }

  /// Returns the number of distinct keys in the table.
  ///
  /// This value may change immediately after reading due to concurrent
  /// operations in other threads.
  ///
  /// # Examples
  ///
  /// ```
  /// use htab::HTab;
  ///
  /// let table: HTab = HTab::new();
  /// assert_eq!(table.len(), 0);
  ///
  /// table.insert("alice", 1);
  /// table.insert("bob", 2);
  /// table.insert("alice", 3); // overwrite, not a new key
  /// assert_eq!(table.len(), 2);
  /// ```
  #[inline]
  pub fn len(&self) -> usize {
    self.inner.len() as usize
  }

  /// Returns `true` if the table contains no entries.
  ///
  /// # Examples
  ///
  /// ```
  /// use htab::HTab;
  ///
  /// let table: HTab = HTab::new();
  /// assert!(table.is_empty());
  ///
  /// table.insert("alice", 1);
  /// assert!(!table.is_empty());
  /// ```
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  /// Inserts `key` with `value`, overwriting the value if `key` is present.
  ///
  /// The table stores its own copy of the key; the borrow ends when the
  /// call returns. Inserting never fails and never blocks writers working
  /// on other buckets; two inserts to the *same* bucket serialize briefly
  /// around the chain splice.
  ///
  /// # Examples
  ///
  /// ```
  /// use htab::HTab;
  ///
  /// let table: HTab = HTab::new();
  ///
  /// table.insert("alice", 1);
  /// table.insert("alice", 3);
  ///
  /// assert_eq!(table.read("alice"), Some(3));
  /// assert_eq!(table.len(), 1);
  /// ```
  #[inline]
  pub fn insert(&self, key: &str, value: u32) {
    self.inner.insert(key, value);
  }

  /// Returns `true` if the table contains `key`.
  ///
  /// Takes no lock. The result may become stale immediately under
  /// concurrent insertion; a `true` result is final, since entries are
  /// never removed.
  ///
  /// # Examples
  ///
  /// ```
  /// use htab::HTab;
  ///
  /// let table: HTab = HTab::new();
  /// table.insert("alice", 1);
  ///
  /// assert!(table.exists("alice"));
  /// assert!(!table.exists("carol"));
  /// ```
  #[inline]
  pub fn exists(&self, key: &str) -> bool {
    self.inner.exists(key)
  }

  /// Returns the value stored for `key`, or `None` if `key` is absent.
  ///
  /// Takes no lock. Under a concurrent overwrite of the same key, either
  /// the old or the new value may be returned.
  ///
  /// # Examples
  ///
  /// ```
  /// use htab::HTab;
  ///
  /// let table: HTab = HTab::new();
  /// table.insert("alice", 1);
  ///
  /// assert_eq!(table.read("alice"), Some(1));
  /// assert_eq!(table.read("carol"), None);
  /// ```
  #[inline]
  pub fn read(&self, key: &str) -> Option<u32> {
    self.inner.read(key)
  }

  /// Returns the value stored for `key`.
  ///
  /// This is the contract-checked lookup: callers use it when the key is
  /// known to be present, e.g. after the inserting threads have been
  /// joined. Use [`read`](Self::read) when absence is an expected outcome.
  ///
  /// # Panics
  ///
  /// Panics if `key` is not present in the table.
  ///
  /// # Examples
  ///
  /// ```
  /// use htab::HTab;
  ///
  /// let table: HTab = HTab::new();
  /// table.insert("alice", 3);
  ///
  /// assert_eq!(table.value("alice"), 3);
  /// ```
  #[track_caller]
  #[inline]
  pub fn value(&self, key: &str) -> u32 {
    match self.inner.read(key) {
      Some(value) => value,
      None => panic!("no entry for key: {key:?}"),
    }
  }
}

impl<P> Debug for HTab<P>
where
  P: Params + ?Sized,
{
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    f.debug_struct("HTab")
      .field("params", &P::debug())
      .field("entries", &self.inner)
      .finish()
  }
}

impl<P> Default for HTab<P>
where
  P: Params + ?Sized,
{
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

// SAFETY: The bucket array is immutable after construction, chain structure
// is guarded by per-bucket locks, and values are atomics, so the table may
// be moved to and referenced from other threads.
unsafe impl<P> Send for HTab<P> where P: Params + ?Sized {}

// SAFETY: Shared access is mediated through bucket locks and atomic loads;
// no operation hands out a non-atomic mutable view of shared state.
unsafe impl<P> Sync for HTab<P> where P: Params + ?Sized {}

// These impls are intentionally unconditional because:
// 1. Keys and values are plain data (no user drop glue or interior refs)
// 2. A panicking writer poisons its bucket lock, and later writers treat
//    the poison as fatal rather than observing a half-spliced chain
impl<P> RefUnwindSafe for HTab<P> where P: Params + ?Sized {}
impl<P> UnwindSafe for HTab<P> where P: Params + ?Sized {}
