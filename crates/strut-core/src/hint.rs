#![forbid(unsafe_code)]

//! Size hints: `(min, preferred, max)` bounds on one axis of a rectangle.

use std::fmt;

/// A `(min, preferred, max)` triple bounding an axis's length.
///
/// Every rectangle carries one hint per axis. The allocator reads hints to
/// decide how much of a container's length each child receives; resize
/// validation reads `min` to refuse sizes a widget cannot draw itself at.
///
/// `max` may be [`SizeHint::UNBOUNDED`] (`f64::INFINITY`) to mark an axis as
/// allowed to grow without limit. The invariant `min <= pref <= max` is
/// expected but not enforced by construction; [`SizeHint::try_new`] only
/// rejects values that are not valid lengths at all.
///
/// # Example
///
/// ```
/// use strut_core::SizeHint;
///
/// // A sidebar that wants 200px but tolerates 120..=320.
/// let hint = SizeHint::new(200.0, 120.0, 320.0);
/// assert_eq!(hint.clamp(250.0), 250.0);
/// assert_eq!(hint.clamp(100.0), 120.0);
/// assert_eq!(hint.clamp(400.0), 320.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeHint {
    /// Minimum acceptable length.
    pub min: f64,
    /// Preferred length, used as the allocation baseline.
    pub pref: f64,
    /// Maximum useful length. [`SizeHint::UNBOUNDED`] means no limit.
    pub max: f64,
}

impl SizeHint {
    /// Sentinel for "no maximum": the axis may grow without bound.
    pub const UNBOUNDED: f64 = f64::INFINITY;

    /// Create a hint with explicit minimum, preferred, and maximum lengths.
    #[inline]
    pub const fn new(pref: f64, min: f64, max: f64) -> Self {
        Self { min, pref, max }
    }

    /// Create a rigid hint: `min == pref == max`.
    #[inline]
    pub const fn fixed(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// Create a hint with a floor and a preferred length, unbounded above.
    #[inline]
    pub const fn at_least(min: f64, pref: f64) -> Self {
        Self::new(pref, min, Self::UNBOUNDED)
    }

    /// Create a hint, rejecting components that are not valid lengths.
    ///
    /// `min` and `pref` must be finite and non-negative; `max` must be
    /// non-negative and not NaN (`f64::INFINITY` is the unbounded sentinel).
    pub fn try_new(pref: f64, min: f64, max: f64) -> Result<Self, HintError> {
        for (component, value) in [("min", min), ("pref", pref)] {
            if !value.is_finite() {
                return Err(HintError::NonFinite { component, value });
            }
            if value < 0.0 {
                return Err(HintError::Negative { component, value });
            }
        }
        if max.is_nan() {
            return Err(HintError::NonFinite {
                component: "max",
                value: max,
            });
        }
        if max < 0.0 {
            return Err(HintError::Negative {
                component: "max",
                value: max,
            });
        }
        Ok(Self::new(pref, min, max))
    }

    /// Check whether a length satisfies this hint.
    ///
    /// The contract is `min <= value && value < max`: the lower bound is
    /// inclusive, the upper bound strict. With an unbounded `max` every
    /// length at or above `min` is acceptable.
    #[inline]
    pub fn ok(&self, value: f64) -> bool {
        value >= self.min && self.max > value
    }

    /// Clamp a length into this hint's bounds.
    ///
    /// Returns `value` unchanged when [`ok`](Self::ok) accepts it, `min`
    /// when below, `max` otherwise. Total over all `f64` inputs and, for
    /// well-formed hints (`min <= max`), idempotent:
    /// `clamp(clamp(x)) == clamp(x)`.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if self.ok(value) {
            value
        } else if value < self.min {
            self.min
        } else {
            self.max
        }
    }

    /// Check whether the maximum is the unbounded sentinel.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.max == Self::UNBOUNDED
    }

    /// Residual upside beyond the preferred length (`max - pref`).
    #[inline]
    pub fn upside(&self) -> f64 {
        self.max - self.pref
    }
}

impl From<f64> for SizeHint {
    /// A bare length coerces to a rigid hint.
    #[inline]
    fn from(value: f64) -> Self {
        Self::fixed(value)
    }
}

/// A size-hint component that is not a valid length.
///
/// Raised at construction time: no rectangle can exist without a valid hint
/// pair, so malformed hints fail fast instead of poisoning later layout
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HintError {
    /// Component is NaN, or infinite where only finite values are allowed.
    NonFinite {
        /// Which component was rejected (`"min"`, `"pref"`, or `"max"`).
        component: &'static str,
        /// The offending value.
        value: f64,
    },
    /// Component is below zero.
    Negative {
        /// Which component was rejected (`"min"`, `"pref"`, or `"max"`).
        component: &'static str,
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for HintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { component, value } => {
                write!(f, "size hint {component} must be a finite length, got {value}")
            }
            Self::Negative { component, value } => {
                write!(f, "size hint {component} must be non-negative, got {value}")
            }
        }
    }
}

impl std::error::Error for HintError {}
