//! Validated bucket indices.
//!
//! [`Concrete<P>`] proves that an index is in-bounds for the bucket array of
//! a table configured with `P`, allowing unchecked array access.

use crate::hash::bernstein;
use crate::params::Params;
use crate::params::ParamsExt;

/// An index into the bucket array of a table configured with `P`.
///
/// Values are always less than [`Params::LENGTH`]; construction goes through
/// the bucket-selection hash, so the bound holds by masking.
#[repr(transparent)]
pub(crate) struct Concrete<P>
where
  P: ?Sized,
{
  source: usize,
  marker: ::core::marker::PhantomData<fn(P)>,
}

impl<P> Concrete<P>
where
  P: Params + ?Sized,
{
  /// Returns the index of the bucket holding `key`.
  ///
  /// With the power-of-two capacity, masking is exactly the
  /// `hash % LENGTH` of the table invariant.
  #[inline]
  pub(crate) fn locate(key: &str) -> Self {
    Self::new(bernstein(key.as_bytes()) as usize & P::MASK)
  }

  #[inline]
  pub(crate) const fn new(source: usize) -> Self {
    debug_assert!(source < P::LENGTH.as_usize());

    Self {
      source,
      marker: ::core::marker::PhantomData,
    }
  }

  #[inline]
  pub(crate) const fn get(self) -> usize {
    self.source
  }
}

impl<P> Clone for Concrete<P>
where
  P: ?Sized,
{
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<P> Copy for Concrete<P> where P: ?Sized {}

impl<P> ::core::cmp::PartialEq for Concrete<P>
where
  P: ?Sized,
{
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.source == other.source
  }
}

impl<P> ::core::fmt::Debug for Concrete<P>
where
  P: ?Sized,
{
  fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
    ::core::fmt::Debug::fmt(&self.source, f)
  }
}

#[cfg(test)]
mod tests {
  use super::Concrete;
  use crate::hash::bernstein;
  use crate::params::ConstParams;
  use crate::params::Params;

  #[test]
  fn test_locate_matches_modulus() {
    type P = ConstParams<64>;

    for key in ["", "alice", "bob", "carol", "a longer key with spaces"] {
      let index: Concrete<P> = Concrete::locate(key);
      let expect: usize = bernstein(key.as_bytes()) as usize % P::LENGTH.as_usize();

      assert_eq!(index.get(), expect);
    }
  }

  #[test]
  fn test_locate_in_bounds() {
    type P = ConstParams<16>;

    for index in 0..1000 {
      let key: String = format!("key-{index}");

      assert!(Concrete::<P>::locate(&key).get() < P::LENGTH.as_usize());
    }
  }
}
