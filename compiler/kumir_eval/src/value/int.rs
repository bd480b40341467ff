//! Range-checked integer.
//!
//! `KumirInt` holds values in `[-2147483647, 2147483647]`. Note the range is
//! symmetric: `i32::MIN` is not a valid integer in the language. There are no
//! operator impls; all arithmetic goes through checked methods that return
//! `None` when the result leaves the range.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct KumirInt(i32);

impl KumirInt {
    pub const MAX: Self = Self(2_147_483_647);
    pub const MIN: Self = Self(-2_147_483_647);
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    /// Range-checked construction.
    #[inline]
    pub fn new(value: i64) -> Option<Self> {
        if value < i64::from(Self::MIN.0) || value > i64::from(Self::MAX.0) {
            return None;
        }
        i32::try_from(value).ok().map(Self)
    }

    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Self::new(i64::from(self.0) + i64::from(rhs.0))
    }

    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        Self::new(i64::from(self.0) - i64::from(rhs.0))
    }

    /// Negation never leaves the symmetric range.
    #[inline]
    #[must_use]
    pub const fn neg(self) -> Self {
        Self(-self.0)
    }

    /// Integer power for non-negative exponents.
    pub fn checked_pow(self, exp: Self) -> Option<Self> {
        let exp = u32::try_from(exp.0).ok()?;
        Self::new(i64::from(self.0).checked_pow(exp)?)
    }

    /// Floor division (`div`). `None` on a zero divisor.
    pub fn checked_floor_div(self, rhs: Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        let (a, b) = (i64::from(self.0), i64::from(rhs.0));
        let q = a / b;
        let q = if a % b != 0 && ((a < 0) != (b < 0)) { q - 1 } else { q };
        Self::new(q)
    }

    /// Floor modulo (`mod`): the result takes the sign of the divisor.
    pub fn checked_floor_mod(self, rhs: Self) -> Option<Self> {
        let q = self.checked_floor_div(rhs)?;
        let r = i64::from(self.0) - i64::from(rhs.0) * i64::from(q.0);
        Self::new(r)
    }
}

impl fmt::Debug for KumirInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for KumirInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<KumirInt> for i64 {
    fn from(value: KumirInt) -> Self {
        i64::from(value.0)
    }
}
