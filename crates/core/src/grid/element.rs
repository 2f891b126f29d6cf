//! Weight element trait for generic pixel values

use num_traits::{NumCast, Zero};
use std::cmp::Ordering;
use std::fmt::Debug;

/// Trait for types that can be stored as pixel weights.
///
/// Component-tree construction only needs a total order over weights; the
/// remaining bounds keep images cheap to copy and easy to convert.
pub trait Weight:
    Copy + Clone + Debug + PartialOrd + PartialEq + NumCast + Zero + Send + Sync + 'static
{
    /// Total order over weight values.
    ///
    /// For floats this is IEEE `total_cmp`, so NaN payloads sort
    /// deterministically instead of poisoning the ordering.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Convert self to f64
    fn to_f64(self) -> Option<f64> {
        NumCast::from(self)
    }
}

macro_rules! impl_weight_int {
    ($t:ty) => {
        impl Weight for $t {
            fn total_cmp(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }
        }
    };
}

macro_rules! impl_weight_float {
    ($t:ty) => {
        impl Weight for $t {
            fn total_cmp(&self, other: &Self) -> Ordering {
                <$t>::total_cmp(self, other)
            }
        }
    };
}

impl_weight_int!(i8);
impl_weight_int!(i16);
impl_weight_int!(i32);
impl_weight_int!(i64);
impl_weight_int!(u8);
impl_weight_int!(u16);
impl_weight_int!(u32);
impl_weight_int!(u64);
impl_weight_float!(f32);
impl_weight_float!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_total_order() {
        assert_eq!(3u8.total_cmp(&7), Ordering::Less);
        assert_eq!(7i32.total_cmp(&7), Ordering::Equal);
        assert_eq!((-1i16).total_cmp(&-4), Ordering::Greater);
    }

    #[test]
    fn test_float_total_order() {
        assert_eq!(1.5f64.total_cmp(&2.0), Ordering::Less);
        assert_eq!(f32::NAN.total_cmp(&f32::NAN), Ordering::Equal);
        assert_eq!(f64::NEG_INFINITY.total_cmp(&0.0), Ordering::Less);
    }
}
