use crate::params::Capacity;
use crate::params::Params;
use crate::params::ParamsExt;
use crate::utils::each_capacity;

#[test]
fn test_capacity_min() {
  assert_eq!(
    Capacity::new(1).as_usize(),
    Capacity::MIN.as_usize(),
    "invalid capacity: expected clamp to MIN",
  );
}

#[test]
fn test_capacity_max() {
  assert_eq!(
    Capacity::new(1 << 30).as_usize(),
    Capacity::MAX.as_usize(),
    "invalid capacity: expected clamp to MAX",
  );
}

#[test]
fn test_capacity_round_up() {
  assert_eq!(
    Capacity::new((1 << 7) - 25).as_usize(),
    1 << 7,
    "invalid capacity: expected round up",
  );
}

#[test]
fn test_capacity_exact() {
  assert_eq!(
    Capacity::new(1 << 8).as_usize(),
    1 << 8,
    "invalid capacity: expected no change",
  );
}

#[test]
fn test_capacity_default() {
  assert_eq!(Capacity::default().as_usize(), Capacity::DEF.as_usize());
  assert_eq!(Capacity::DEF.as_usize(), 4096);
}

#[test]
fn test_mask_is_modulus() {
  each_capacity!({
    assert!(
      P::LENGTH.as_usize().is_power_of_two(),
      "invalid params: `LENGTH` must be a power of two - {:?}",
      P::debug(),
    );

    for hash in [0_usize, 1, 97, 5381, 253_185_475, usize::MAX] {
      assert_eq!(
        hash & P::MASK,
        hash % P::LENGTH.as_usize(),
        "invalid params: mask disagrees with modulus - {:?}",
        P::debug(),
      );
    }
  });
}

#[test]
fn test_mask_covers_all_buckets() {
  each_capacity!({
    assert_eq!(
      P::MASK + 1,
      P::LENGTH.as_usize(),
      "invalid params: corrupted mask - {:?}",
      P::debug(),
    );
  });
}
