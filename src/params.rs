use core::any;
use core::fmt::Debug;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;
use core::marker::PhantomData;
use core::mem;
use core::num::NonZeroUsize;

use crossbeam_utils::CachePadded;

// -----------------------------------------------------------------------------
// Cache-line Properties
// -----------------------------------------------------------------------------

/// The size of a cache line in bytes.
///
/// Buckets are padded to this size so that adjacent buckets, and therefore
/// adjacent bucket locks, never share a cache line.
pub const CACHE_LINE: usize = size_of::<CachePadded<u8>>();

const _: () = assert!(
  CACHE_LINE.is_power_of_two(),
  "invalid params: `CACHE_LINE` must be a power of two",
);

// -----------------------------------------------------------------------------
// Configurable Params
// -----------------------------------------------------------------------------

/// Configuration parameters for an [`HTab`].
///
/// Allows customizing the bucket count at compile time. The simplest approach
/// is [`ConstParams`]:
///
/// ```no_run
/// use htab::{HTab, ConstParams};
///
/// type MyTable = HTab<ConstParams<8192>>;
/// ```
///
/// # Implementing `Params`
///
/// For advanced use cases, implement directly:
///
/// ```no_run
/// use htab::{Params, Capacity, HTab};
///
/// struct LargeParams;
///
/// impl Params for LargeParams {
///   const LENGTH: Capacity = Capacity::new(1 << 16);
/// }
///
/// let table: HTab<LargeParams> = HTab::new();
/// ```
///
/// [`Capacity::new`] clamps values to the valid range and rounds up to the
/// nearest power of two.
///
/// [`HTab`]: crate::public::HTab
pub trait Params {
  /// The number of buckets in the table.
  ///
  /// This value is rounded up to the nearest power of two and clamped to
  /// <code>[Capacity::MIN]..=[Capacity::MAX]</code>. It is also the modulus
  /// of the bucket-selection hash: every key lives in the bucket at index
  /// `hash(key) % LENGTH`.
  const LENGTH: Capacity = DefaultParams::LENGTH;
}

// -----------------------------------------------------------------------------
// Configurable Params - Extensions
// -----------------------------------------------------------------------------

/// Derived parameters computed from [`Params`].
///
/// Automatically implemented for all [`Params`] types. Provides computed
/// constants used internally.
///
/// # Example
///
/// ```no_run
/// use htab::{ParamsExt, ConstParams};
///
/// println!("{:#?}", <ConstParams<1024> as ParamsExt>::debug());
/// ```
pub trait ParamsExt: Params + Sealed {
  /// Bucket-selection mask. With a power-of-two [`Params::LENGTH`],
  /// `hash & MASK` equals `hash % LENGTH`.
  const MASK: usize = Self::LENGTH.as_usize() - 1;

  fn validate() {
    assert!(
      Self::LENGTH.as_usize().is_power_of_two(),
      "invalid params: `LENGTH` must be a power of two",
    );
  }

  #[inline]
  fn debug() -> DebugParams<Self> {
    DebugParams {
      marker: PhantomData,
    }
  }
}

// -----------------------------------------------------------------------------
// Debug Params
// -----------------------------------------------------------------------------

/// A helper type for displaying [`Params`] configuration.
///
/// Returned by [`ParamsExt::debug`]; implements [`Debug`] to show all derived
/// configuration values.
#[derive(Clone, Copy)]
pub struct DebugParams<P>
where
  P: ?Sized,
{
  marker: PhantomData<fn(P)>,
}

impl<P> Debug for DebugParams<P>
where
  P: Params + ?Sized,
{
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct(any::type_name::<P>())
      .field("LENGTH", &P::LENGTH)
      .field("MASK", &format_args!("{:0>32b}", P::MASK))
      .finish()
  }
}

// -----------------------------------------------------------------------------
// Default Params
// -----------------------------------------------------------------------------

/// The default table configuration with [`Capacity::DEF`] buckets.
///
/// Used when creating an [`HTab`] without specifying a custom [`Params`] type.
///
/// # Example
///
/// ```no_run
/// use htab::{HTab, DefaultParams};
///
/// // These are equivalent:
/// let table1: HTab = HTab::new();
/// let table2: HTab<DefaultParams> = HTab::new();
/// ```
///
/// [`HTab`]: crate::public::HTab
#[derive(Clone, Copy)]
#[non_exhaustive]
pub struct DefaultParams;

impl Debug for DefaultParams {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    Debug::fmt(&<Self as ParamsExt>::debug(), f)
  }
}

impl Params for DefaultParams {
  const LENGTH: Capacity = Capacity::DEF;
}

// -----------------------------------------------------------------------------
// Const-Generic Params
// -----------------------------------------------------------------------------

/// A [`Params`] implementation with compile-time configurable bucket count.
///
/// The recommended way to create tables with custom capacities. The capacity
/// `N` is rounded up to the nearest power of two and clamped to
/// <code>[Capacity::MIN]..=[Capacity::MAX]</code>.
///
/// # Examples
///
/// ```no_run
/// use htab::{HTab, ConstParams};
///
/// let table: HTab<ConstParams<4096>> = HTab::new();
/// assert_eq!(table.capacity(), 4096);
/// ```
///
/// ```no_run
/// use htab::{HTab, ConstParams};
///
/// // Values are rounded up to powers of two
/// let table: HTab<ConstParams<1000>> = HTab::new();
/// assert_eq!(table.capacity(), 1024);
/// ```
///
/// # Type Aliases
///
/// For frequently-used configurations, define a type alias:
///
/// ```no_run
/// use htab::{HTab, ConstParams};
///
/// type SmallTable = HTab<ConstParams<64>>;
/// type LargeTable = HTab<ConstParams<{ 1 << 20 }>>;
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[non_exhaustive]
pub struct ConstParams<const N: usize>;

impl<const N: usize> Params for ConstParams<N> {
  const LENGTH: Capacity = Capacity::new(N);
}

// -----------------------------------------------------------------------------
// Auto-implement Derive
// -----------------------------------------------------------------------------

mod private {
  pub trait Sealed {}
}

use private::Sealed;

impl<P> Sealed for P where P: Params + ?Sized {}
impl<P> ParamsExt for P where P: Params + ?Sized {}

// -----------------------------------------------------------------------------
// Capacity
// -----------------------------------------------------------------------------

/// A validated table capacity value.
///
/// Represents a power-of-two value in the range <code>[MIN]..=[MAX]</code>.
/// Used by [`Params::LENGTH`] to specify the bucket count.
///
/// # Construction
///
/// Use [`new()`] to create from an arbitrary value; it rounds up to the nearest
/// power of two and clamps to the valid range.
///
/// ```no_run
/// use htab::Capacity;
///
/// // Exact power of two
/// let cap = Capacity::new(256);
/// assert_eq!(cap.as_usize(), 256);
///
/// // Rounded up
/// let cap = Capacity::new(100);
/// assert_eq!(cap.as_usize(), 128);
///
/// // Clamped to minimum
/// let cap = Capacity::new(1);
/// assert_eq!(cap, Capacity::MIN);
///
/// // Clamped to maximum
/// let cap = Capacity::new(usize::MAX);
/// assert_eq!(cap, Capacity::MAX);
/// ```
///
/// [MIN]: Self::MIN
/// [MAX]: Self::MAX
/// [`new()`]: Self::new
#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct Capacity(CapacityEnum);

impl Capacity {
  /// The minimum supported capacity (2⁴ buckets).
  pub const MIN: Self = Self(CapacityEnum::_Capacity1Shl4);

  /// The maximum supported capacity (2²⁴ buckets).
  pub const MAX: Self = Self(CapacityEnum::_Capacity1Shl24);

  /// The default capacity (2¹² buckets).
  pub const DEF: Self = Self(CapacityEnum::_Capacity1Shl12);

  /// Creates a new [`Capacity`] from an arbitrary value.
  ///
  /// Rounds up to the nearest power of two and clamps to
  /// <code>[MIN]..=[MAX]</code>.
  ///
  /// # Examples
  ///
  /// ```no_run
  /// use htab::Capacity;
  ///
  /// assert_eq!(Capacity::new(100).as_usize(), 128);
  /// assert_eq!(Capacity::new(0), Capacity::MIN);
  /// ```
  ///
  /// [MIN]: Self::MIN
  /// [MAX]: Self::MAX
  #[inline]
  pub const fn new(value: usize) -> Self {
    let Some(capacity) = value.checked_next_power_of_two() else {
      return Self::MAX;
    };

    if capacity < Self::MIN.as_usize() {
      Self::MIN
    } else if capacity > Self::MAX.as_usize() {
      Self::MAX
    } else {
      // SAFETY: `capacity` is non-zero because values below `Self::MIN` take
      // the earlier branch.
      unsafe { Self::new_unchecked(capacity) }
    }
  }

  /// Creates a new [`Capacity`] without validation.
  ///
  /// # Safety
  ///
  /// `value` must be a power of two in <code>[MIN]..=[MAX]</code>.
  ///
  /// [MIN]: Self::MIN
  /// [MAX]: Self::MAX
  #[inline]
  pub const unsafe fn new_unchecked(value: usize) -> Self {
    // SAFETY: Caller guarantees `value` is a valid `Capacity`.
    unsafe { mem::transmute::<usize, Self>(value) }
  }

  /// Returns the capacity as a [`usize`].
  #[inline]
  pub const fn as_usize(self) -> usize {
    self.0 as usize
  }

  /// Returns the capacity as a [`NonZeroUsize`].
  #[inline]
  pub const fn as_nonzero(self) -> NonZeroUsize {
    // SAFETY: All `Capacity` values are non-zero by construction.
    unsafe { mem::transmute::<Self, NonZeroUsize>(self) }
  }

  /// Returns the base-2 logarithm of the capacity.
  ///
  /// Equivalent to the bit position of the single set bit, since capacity is
  /// always a power of two.
  ///
  /// # Examples
  ///
  /// ```no_run
  /// use htab::Capacity;
  ///
  /// assert_eq!(Capacity::new(1024).log2(), 10);
  /// ```
  #[inline]
  pub const fn log2(self) -> u32 {
    self.as_nonzero().trailing_zeros()
  }
}

impl Debug for Capacity {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "{:?} (1 << {:?})", self.as_nonzero(), self.log2())
  }
}

impl Default for Capacity {
  #[inline]
  fn default() -> Self {
    Self::DEF
  }
}

impl From<Capacity> for NonZeroUsize {
  #[inline]
  fn from(other: Capacity) -> Self {
    other.as_nonzero()
  }
}

impl From<Capacity> for usize {
  #[inline]
  fn from(other: Capacity) -> Self {
    other.as_usize()
  }
}

#[derive(Copy, Clone, PartialEq, Eq)]
#[repr(usize)]
enum CapacityEnum {
  _Capacity1Shl4 = 1 << 4,
  _Capacity1Shl5 = 1 << 5,
  _Capacity1Shl6 = 1 << 6,
  _Capacity1Shl7 = 1 << 7,
  _Capacity1Shl8 = 1 << 8,
  _Capacity1Shl9 = 1 << 9,
  _Capacity1Shl10 = 1 << 10,
  _Capacity1Shl11 = 1 << 11,
  _Capacity1Shl12 = 1 << 12,
  _Capacity1Shl13 = 1 << 13,
  _Capacity1Shl14 = 1 << 14,
  _Capacity1Shl15 = 1 << 15,
  _Capacity1Shl16 = 1 << 16,
  _Capacity1Shl17 = 1 << 17,
  _Capacity1Shl18 = 1 << 18,
  _Capacity1Shl19 = 1 << 19,
  _Capacity1Shl20 = 1 << 20,
  _Capacity1Shl21 = 1 << 21,
  _Capacity1Shl22 = 1 << 22,
  _Capacity1Shl23 = 1 << 23,
  _Capacity1Shl24 = 1 << 24,
}
