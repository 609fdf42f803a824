//! A single bucket: one lock, one chain.
//!
//! The bucket is the unit of locking and the unit of consistency. Its chain
//! is a singly-linked list of heap nodes, newest first. Structural mutation
//! (linking a node at the head) happens only under the bucket lock; readers
//! never lock. The head is an atomic pointer published with `Release` and
//! read with `Acquire`, so a half-linked node is never observable: a node's
//! `next` is written before the head store that makes the node reachable.
//!
//! Nodes are never unlinked individually. The only way a node is freed is
//! `Bucket::drop`, which requires exclusive access to the bucket, so a
//! shared borrow of the bucket keeps every reachable node alive. This is
//! what makes the lock-free read path sound without deferred reclamation.

use core::ptr;

use crate::sync::Mutex;
use crate::sync::atomic::AtomicPtr;
use crate::sync::atomic::AtomicU32;
use crate::sync::atomic::Ordering::Acquire;
use crate::sync::atomic::Ordering::Relaxed;
use crate::sync::atomic::Ordering::Release;

// -----------------------------------------------------------------------------
// Chain Node
// -----------------------------------------------------------------------------

/// One entry: an owned key, an atomic value, and the link to the next node.
///
/// The key is immutable once inserted. The value is a bare `u32` behind an
/// atomic so that the in-place overwrite in [`Bucket::insert`] and the
/// lock-free read in [`Bucket::find`] are torn-free; last-writer-wins is the
/// only ordering the table promises for racing overwrites, hence `Relaxed`.
pub(crate) struct Node {
  key: Box<str>,
  value: AtomicU32,
  next: *const Node,
}

impl Node {
  #[inline]
  fn new(key: &str, value: u32) -> Self {
    Self {
      key: Box::from(key),
      value: AtomicU32::new(value),
      next: ptr::null(),
    }
  }

  #[inline]
  pub(crate) fn key(&self) -> &str {
    &self.key
  }

  #[inline]
  pub(crate) fn get(&self) -> u32 {
    self.value.load(Relaxed)
  }

  #[inline]
  fn set(&self, value: u32) {
    self.value.store(value, Relaxed);
  }
}

// -----------------------------------------------------------------------------
// Bucket
// -----------------------------------------------------------------------------

/// One slot of the bucket array.
pub(crate) struct Bucket {
  head: AtomicPtr<Node>,
  lock: Mutex<()>,
}

impl Bucket {
  #[inline]
  pub(crate) fn new() -> Self {
    Self {
      head: AtomicPtr::new(ptr::null_mut()),
      lock: Mutex::new(()),
    }
  }

  /// Returns the entry for `key`, if present.
  ///
  /// Takes no lock: the chain snapshot reachable from an `Acquire` head load
  /// is immutable apart from atomic value overwrites.
  #[inline]
  pub(crate) fn find(&self, key: &str) -> Option<&Node> {
    self.search(self.head.load(Acquire), ptr::null(), key)
  }

  /// Inserts or overwrites the entry for `key`.
  ///
  /// Returns `true` iff a new node was linked (i.e. the key was not already
  /// present). Scanning and node allocation stay outside the critical
  /// section; the lock is held only around the head splice.
  pub(crate) fn insert(&self, key: &str, value: u32) -> bool {
    let seen: *const Node = self.head.load(Acquire);

    // Overwriting an existing value does not change chain structure, so the
    // fast path takes no lock.
    if let Some(node) = self.search(seen, ptr::null(), key) {
      node.set(value);
      return false;
    }

    let mut node: Box<Node> = Box::new(Node::new(key, value));

    let guard = match self.lock.lock() {
      Ok(guard) => guard,
      // A writer died while holding the lock; the chain state is unknown.
      Err(_poisoned) => panic!("bucket lock poisoned"),
    };

    // Lock acquisition synchronizes with the previous holder's release, so
    // a relaxed load observes the latest head.
    let head: *const Node = self.head.load(Relaxed);

    // A racing writer may have linked this key between the unlocked scan
    // and lock acquisition. Insertion is head-only and nodes are never
    // unlinked, so exactly the nodes in `head..seen` are new; re-checking
    // that prefix is enough to keep chain keys unique.
    if let Some(node) = self.search(head, seen, key) {
      node.set(value);
      return false;
    }

    node.next = head;

    self.head.store(Box::into_raw(node), Release);

    drop(guard);

    true
  }

  /// Walks the chain from `from` (exclusive of `until`) looking for `key`.
  ///
  /// Passing a null `until` scans to the end of the chain.
  #[inline]
  fn search<'chain>(
    &'chain self,
    from: *const Node,
    until: *const Node,
    key: &str,
  ) -> Option<&'chain Node> {
    let mut cursor: *const Node = from;

    while cursor != until && !cursor.is_null() {
      // SAFETY: Reachable nodes are freed only by `Bucket::drop`, which
      // requires exclusive access; this shared borrow keeps them alive.
      let node: &Node = unsafe { &*cursor };

      if node.key() == key {
        return Some(node);
      }

      cursor = node.next;
    }

    None
  }

  /// Iterates the chain, applying `f` to every entry.
  ///
  /// Same locking discipline as [`Bucket::find`].
  pub(crate) fn each<F>(&self, mut f: F)
  where
    F: FnMut(&Node),
  {
    let mut cursor: *const Node = self.head.load(Acquire);

    while !cursor.is_null() {
      // SAFETY: See `search`.
      let node: &Node = unsafe { &*cursor };

      f(node);

      cursor = node.next;
    }
  }
}

impl Drop for Bucket {
  fn drop(&mut self) {
    let mut cursor: *mut Node = self.head.load(Relaxed);

    while !cursor.is_null() {
      // SAFETY: `&mut self` guarantees quiescence; every linked node was
      // created by `Box::into_raw` in `insert`.
      let node: Box<Node> = unsafe { Box::from_raw(cursor) };

      cursor = node.next.cast_mut();
    }
  }
}
