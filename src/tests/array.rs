use core::mem::MaybeUninit;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use crossbeam_utils::CachePadded;

use crate::array::Array;
use crate::index::Concrete;
use crate::params::CACHE_LINE;
use crate::params::ConstParams;
use crate::utils::each_capacity;

#[test]
fn alignment() {
  each_capacity!({
    let array: Array<CachePadded<u64>, P> = Array::new(|_, uninit| {
      uninit.write(CachePadded::new(0));
    });

    // TODO: ptr::is_aligned_to once stable
    assert_eq!(array.as_ptr().addr() & (CACHE_LINE - 1), 0);
  });
}

#[test]
fn slice_representation() {
  let array: Array<usize, ConstParams<64>> = Array::new(|index, uninit| {
    uninit.write(index);
  });

  assert_eq!(array.as_slice().len(), 64);

  for (index, value) in array.as_slice().iter().enumerate() {
    assert_eq!(*value, index);
  }
}

#[test]
fn indexed_access() {
  type P = ConstParams<32>;

  let array: Array<usize, P> = Array::new(|index, uninit| {
    uninit.write(index * 7);
  });

  for index in 0..32 {
    assert_eq!(*array.get(Concrete::<P>::new(index)), index * 7);
  }
}

#[test]
fn element_drop() {
  static COUNT: AtomicU32 = AtomicU32::new(0);

  struct DropMe(usize);

  impl Drop for DropMe {
    fn drop(&mut self) {
      let _ignore: usize = self.0;

      COUNT.fetch_sub(1, Ordering::Relaxed);
    }
  }

  type P = ConstParams<16>;

  let array: Array<DropMe, P> = Array::new(|index, uninit: &mut MaybeUninit<DropMe>| {
    COUNT.fetch_add(1, Ordering::Relaxed);
    uninit.write(DropMe(index));
  });

  assert_eq!(COUNT.load(Ordering::Relaxed), 16);
  drop(array);
  assert_eq!(COUNT.load(Ordering::Relaxed), 0);
}
