//! # Flags Register
//!
//! The LS-8 flags register holds the outcome of the most recent `CMP` in its
//! low three bits (`00000LGE`). Only `CMP` writes it; everything else leaves
//! it alone.

use std::fmt;
use std::ops::BitOr;

/// Comparison flags as a bitmask.
///
/// # Examples
///
/// ```
/// use ls8::Flags;
///
/// let flags = Flags::compare(3, 5);
/// assert_eq!(flags, Flags::LESS_THAN);
/// assert!(!flags.contains(Flags::EQUAL));
/// assert!(flags.intersects(Flags::LESS_THAN | Flags::EQUAL));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags(u8);

impl Flags {
    /// `a == b`
    pub const EQUAL: Flags = Flags(0b0000_0001);

    /// `a > b`
    pub const GREATER_THAN: Flags = Flags(0b0000_0010);

    /// `a < b`
    pub const LESS_THAN: Flags = Flags(0b0000_0100);

    /// No flags set.
    pub const fn empty() -> Flags {
        Flags(0)
    }

    /// Raw bit pattern.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if every bit of `other` is set.
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any bit of `other` is set.
    pub const fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }

    /// True if no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The flags `CMP a, b` produces: exactly one of the three bits.
    pub fn compare(a: u8, b: u8) -> Flags {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Flags::LESS_THAN,
            std::cmp::Ordering::Equal => Flags::EQUAL,
            std::cmp::Ordering::Greater => Flags::GREATER_THAN,
        }
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl fmt::Display for Flags {
    /// Renders as `LGE` with `-` for clear bits, e.g. `--E`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bit = |flag: Flags, c: char| if self.contains(flag) { c } else { '-' };
        write!(
            f,
            "{}{}{}",
            bit(Flags::LESS_THAN, 'L'),
            bit(Flags::GREATER_THAN, 'G'),
            bit(Flags::EQUAL, 'E')
        )
    }
}
