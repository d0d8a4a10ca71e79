//! Edge weight contract shared by the weight, distance and path-cost code.
//!
//! Every weight type carries a distinguished "infinite" value meaning "no edge"
//! in a weight matrix and "no path" in a distance matrix. Addition saturates at
//! that value: once either operand is infinite the sum is infinite, and a
//! finite sum that would overflow becomes infinite instead of wrapping.

use std::fmt::Debug;

/// Numeric type usable as an edge weight.
///
/// Weights are expected to be nonnegative. Negative weights (or a negative
/// cycle) are a precondition violation: distances for affected pairs are
/// unspecified and path reconstruction may report a cyclic intermediate matrix.
///
/// Float addition is not associative: a distance built as `D[i][k] + D[k][j]`
/// and the left-to-right cost of the same path agree only within rounding.
pub trait EdgeWeight: Copy + PartialOrd + Debug + Send + Sync + 'static {
    const ZERO: Self;
    /// Sentinel for "no edge" / "unreachable". Larger than any finite weight.
    const INFINITY: Self;

    /// Sentinel-aware addition. Never produces a value smaller than either
    /// operand for nonnegative inputs.
    fn saturating_add(self, other: Self) -> Self;

    #[inline]
    fn is_infinite(self) -> bool {
        !(self < Self::INFINITY)
    }

    /// `Some(self)` for a finite weight, `None` for the sentinel.
    #[inline]
    fn finite(self) -> Option<Self> {
        if self.is_infinite() { None } else { Some(self) }
    }
}

macro_rules! impl_integer_weight {
    ($($t:ty),*) => {$(
        impl EdgeWeight for $t {
            const ZERO: Self = 0;
            const INFINITY: Self = <$t>::MAX;
            #[inline(always)]
            fn saturating_add(self, other: Self) -> Self {
                // MAX + x saturates to MAX, which is the sentinel.
                <$t>::saturating_add(self, other)
            }
        }
    )*};
}

macro_rules! impl_float_weight {
    ($($t:ty),*) => {$(
        impl EdgeWeight for $t {
            const ZERO: Self = 0.0;
            const INFINITY: Self = <$t>::INFINITY;
            #[inline(always)]
            fn saturating_add(self, other: Self) -> Self {
                self + other
            }
        }
    )*};
}

impl_integer_weight!(u32, u64);
impl_float_weight!(f32, f64);
