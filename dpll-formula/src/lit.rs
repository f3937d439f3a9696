//! Variables and literals.
use std::{fmt, ops};

/// Integer type backing both [`Var`] and [`Lit`].
pub type LitIdx = u32;

/// A propositional variable.
///
/// Variables are stored by their 0-based index. Everything user facing (DIMACS input, models,
/// `Debug` and `Display` output) uses the 1-based DIMACS number instead, so variable `0` here is
/// printed as `1`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Var {
    index: LitIdx,
}

impl Var {
    /// Variable with the given 1-based DIMACS number.
    ///
    /// `number` must be positive and at most `Var::max_count()`.
    #[inline]
    pub fn from_dimacs(number: isize) -> Var {
        debug_assert!(number > 0);
        Var::from_index((number - 1) as usize)
    }

    /// Variable with the given 0-based index.
    #[inline]
    pub fn from_index(index: usize) -> Var {
        debug_assert!(index <= Var::max_var().index());
        Var {
            index: index as LitIdx,
        }
    }

    /// 1-based DIMACS number of the variable.
    #[inline]
    pub fn to_dimacs(self) -> isize {
        (self.index + 1) as isize
    }

    /// 0-based index of the variable.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Largest supported variable.
    ///
    /// A few high bits of [`LitIdx`] stay free for the polarity bit of [`Lit`].
    pub const fn max_var() -> Var {
        Var {
            index: LitIdx::max_value() >> 4,
        }
    }

    /// Largest supported number of variables.
    pub const fn max_count() -> usize {
        Self::max_var().index() + 1
    }

    /// Literal of this variable that is true when the variable has the value `polarity`.
    #[inline]
    pub fn lit(self, polarity: bool) -> Lit {
        Lit::from_var(self, polarity)
    }

    #[inline]
    pub fn positive(self) -> Lit {
        self.lit(true)
    }

    #[inline]
    pub fn negative(self) -> Lit {
        self.lit(false)
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A literal, i.e. a variable or its negation.
///
/// The literal is stored as a single `code`: twice the variable index, plus one for negative
/// literals. A literal and its negation therefore only differ in the lowest bit, and codes can
/// be used to index per-literal tables of length `2 * var_count`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Lit {
    code: LitIdx,
}

impl Lit {
    /// Literal of `var` that is true when `var` has the value `polarity`.
    #[inline]
    pub fn from_var(var: Var, polarity: bool) -> Lit {
        Lit {
            code: (var.index << 1) | (!polarity as LitIdx),
        }
    }

    #[inline]
    pub fn from_index(index: usize, polarity: bool) -> Lit {
        Lit::from_var(Var::from_index(index), polarity)
    }

    /// Literal for a nonzero DIMACS integer.
    ///
    /// The magnitude is the 1-based variable number, the sign is the polarity.
    #[inline]
    pub fn from_dimacs(number: isize) -> Lit {
        debug_assert_ne!(number, 0);
        Lit::from_var(Var::from_dimacs(number.abs()), number > 0)
    }

    /// DIMACS integer for this literal, the inverse of [`from_dimacs`](Lit::from_dimacs).
    #[inline]
    pub fn to_dimacs(self) -> isize {
        let number = self.var().to_dimacs();
        if self.is_negative() {
            -number
        } else {
            number
        }
    }

    #[inline]
    pub fn var(self) -> Var {
        Var {
            index: self.code >> 1,
        }
    }

    /// 0-based index of the literal's variable.
    #[inline]
    pub fn index(self) -> usize {
        (self.code >> 1) as usize
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        (self.code & 1) != 0
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        !self.is_negative()
    }

    /// Internal encoding of the literal.
    #[inline]
    pub fn code(self) -> usize {
        self.code as usize
    }
}

impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Lit {
        Lit {
            code: self.code ^ 1,
        }
    }
}

/// Negates the literal when the right hand side is `true`.
impl ops::BitXor<bool> for Lit {
    type Output = Lit;

    #[inline]
    fn bitxor(self, negate: bool) -> Lit {
        Lit {
            code: self.code ^ (negate as LitIdx),
        }
    }
}

impl From<Var> for Lit {
    #[inline]
    fn from(var: Var) -> Lit {
        var.positive()
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(any(test, feature = "proptest-strategies"))]
#[doc(hidden)]
pub mod strategy {
    use super::*;
    use proptest::{prelude::*, *};

    pub fn var(index: impl Strategy<Value = usize>) -> impl Strategy<Value = Var> {
        index.prop_map(Var::from_index)
    }

    pub fn lit(index: impl Strategy<Value = usize>) -> impl Strategy<Value = Lit> {
        (var(index), bool::ANY).prop_map(|(var, polarity)| var.lit(polarity))
    }
}
