//! Two-word extended-precision intermediate.
//!
//! The multiply, square-root, and fused multiply-add kernels need working
//! values wider than one machine word: a 53x53-bit product is 106 bits, and
//! aligning an addend against such a product can spill further. [`Wide`]
//! models that intermediate as an explicit `{hi, lo}` pair with its own
//! shift/add/subtract/compare operations, so bit-exact semantics never
//! depend on the address adjacency of raw words. The value is transient:
//! kernels fold it back into a single working mantissa (with the shifted-out
//! bits collapsed into a sticky bit) before the one rounding step.

/// A 128-bit unsigned working value as an explicit two-word pair.
///
/// `hi` holds the upper 64 bits, `lo` the lower 64. All operations are
/// unsigned; subtraction requires `self >= rhs`, which the kernels guarantee
/// by comparing first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wide {
    /// Upper 64 bits.
    pub hi: u64,
    /// Lower 64 bits.
    pub lo: u64,
}

impl Wide {
    /// The zero value.
    pub const ZERO: Self = Self { hi: 0, lo: 0 };

    /// Builds a `Wide` from a single low word.
    #[inline]
    pub const fn from_u64(lo: u64) -> Self {
        Self { hi: 0, lo }
    }

    /// Full 64x64 -> 128 bit product, built from 32-bit partial products.
    pub const fn mul_u64(a: u64, b: u64) -> Self {
        let (a_hi, a_lo) = (a >> 32, a & 0xFFFF_FFFF);
        let (b_hi, b_lo) = (b >> 32, b & 0xFFFF_FFFF);

        let ll = a_lo * b_lo;
        let lh = a_lo * b_hi;
        let hl = a_hi * b_lo;
        let hh = a_hi * b_hi;

        // Sum the middle partials into the 32-bit seam, carrying into hi.
        let mid = (ll >> 32) + (lh & 0xFFFF_FFFF) + (hl & 0xFFFF_FFFF);
        let lo = (mid << 32) | (ll & 0xFFFF_FFFF);
        let hi = hh + (lh >> 32) + (hl >> 32) + (mid >> 32);
        Self { hi, lo }
    }

    /// True when both words are zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    /// Number of leading zero bits in the 128-bit value.
    #[inline]
    pub const fn leading_zeros(self) -> u32 {
        if self.hi != 0 {
            self.hi.leading_zeros()
        } else {
            64 + self.lo.leading_zeros()
        }
    }

    /// Wrapping addition of two pairs.
    #[inline]
    pub const fn add(self, rhs: Self) -> Self {
        let (lo, carry) = self.lo.overflowing_add(rhs.lo);
        let hi = self.hi.wrapping_add(rhs.hi).wrapping_add(carry as u64);
        Self { hi, lo }
    }

    /// Subtraction; the caller must ensure `self >= rhs`.
    #[inline]
    pub const fn sub(self, rhs: Self) -> Self {
        let (lo, borrow) = self.lo.overflowing_sub(rhs.lo);
        let hi = self.hi.wrapping_sub(rhs.hi).wrapping_sub(borrow as u64);
        Self { hi, lo }
    }

    /// Unsigned comparison: `self >= rhs`.
    #[inline]
    pub const fn ge(self, rhs: Self) -> bool {
        self.hi > rhs.hi || (self.hi == rhs.hi && self.lo >= rhs.lo)
    }

    /// Left shift by `n` bits (`n < 128`); shifted-out bits are lost.
    pub const fn shl(self, n: u32) -> Self {
        if n == 0 {
            self
        } else if n < 64 {
            Self {
                hi: (self.hi << n) | (self.lo >> (64 - n)),
                lo: self.lo << n,
            }
        } else if n < 128 {
            Self {
                hi: self.lo << (n - 64),
                lo: 0,
            }
        } else {
            Self::ZERO
        }
    }

    /// Shifts left by two and returns the pair of bits shifted out of the top.
    ///
    /// The square-root digit recurrence consumes its radicand two bits per
    /// iteration, most significant pair first.
    #[inline]
    pub const fn shl2_carry(&mut self) -> u64 {
        let out = self.hi >> 62;
        *self = self.shl(2);
        out
    }

    /// Right shift by `n` bits with the shifted-out bits folded into the
    /// lowest kept bit as a sticky bit.
    ///
    /// For `n >= 128` the whole value collapses to a single sticky bit.
    pub const fn shr_sticky(self, n: u32) -> Self {
        if n == 0 {
            return self;
        }
        if n >= 128 {
            return Self::from_u64(!self.is_zero() as u64);
        }
        let sticky = if n < 64 {
            self.lo & (!0_u64 >> (64 - n)) != 0
        } else if n == 64 {
            self.lo != 0
        } else {
            self.lo != 0 || (self.hi & (!0_u64 >> (128 - n))) != 0
        };
        let shifted = if n < 64 {
            Self {
                hi: self.hi >> n,
                lo: (self.lo >> n) | (self.hi << (64 - n)),
            }
        } else {
            Self {
                hi: 0,
                lo: self.hi >> (n - 64),
            }
        };
        Self {
            hi: shifted.hi,
            lo: shifted.lo | sticky as u64,
        }
    }

    /// Folds the value into a `u64` working mantissa with its top bit at
    /// `top`, collapsing everything below into the sticky position.
    ///
    /// The value must be nonzero. Returns the mantissa; the caller supplies
    /// the matching exponent adjustment from [`Self::leading_zeros`].
    pub const fn fold_to_u64(self, top: u32) -> u64 {
        debug_assert!(!self.is_zero() && top < 64);
        let msb = 127 - self.leading_zeros();
        if msb <= top {
            let s = self.shl(top - msb);
            debug_assert!(s.hi == 0);
            s.lo
        } else {
            let s = self.shr_sticky(msb - top);
            s.lo
        }
    }
}
