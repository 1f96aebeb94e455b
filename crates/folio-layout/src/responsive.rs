#![forbid(unsafe_code)]

//! Width breakpoints and breakpoint-aware values.
//!
//! The split screen is only interactive on wide containers. Below the `lg`
//! breakpoint the two panels stack vertically and pointer effects are off.
//!
//! [`Responsive<T>`] maps [`Breakpoint`] tiers to values with inheritance
//! from smaller tiers: a tier without an explicit value uses the nearest
//! smaller tier that has one.
//!
//! ```
//! use folio_layout::{Breakpoint, Breakpoints, Responsive, SplitMode};
//!
//! let mode = SplitMode::responsive();
//! let bp = Breakpoints::DEFAULT.classify(1440.0);
//! assert_eq!(bp, Breakpoint::Xl);
//! assert_eq!(mode.resolve(bp), &SplitMode::Interactive);
//!
//! let padding = Responsive::new(24).at(Breakpoint::Md, 32);
//! assert_eq!(padding.resolve(Breakpoint::Lg), &32);
//! ```
//!
//! # Invariants
//!
//! 1. `Xs` always has a value (set via `new()`).
//! 2. `resolve()` never fails.
//! 3. Width classification is monotonic: a wider container never maps to a
//!    smaller breakpoint.

use std::fmt;

/// Width tiers, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    Xs = 0,
    Sm = 1,
    Md = 2,
    Lg = 3,
    Xl = 4,
}

impl Breakpoint {
    pub const ALL: [Self; 5] = [Self::Xs, Self::Sm, Self::Md, Self::Lg, Self::Xl];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Minimum container widths (CSS pixels) for each tier above `Xs`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoints {
    pub sm: f64,
    pub md: f64,
    pub lg: f64,
    pub xl: f64,
}

impl Breakpoints {
    pub const DEFAULT: Self = Self {
        sm: 640.0,
        md: 768.0,
        lg: 1024.0,
        xl: 1280.0,
    };

    /// Tier for a container `width` pixels wide. Non-finite widths map to `Xs`.
    #[must_use]
    pub fn classify(&self, width: f64) -> Breakpoint {
        if !width.is_finite() {
            Breakpoint::Xs
        } else if width >= self.xl {
            Breakpoint::Xl
        } else if width >= self.lg {
            Breakpoint::Lg
        } else if width >= self.md {
            Breakpoint::Md
        } else if width >= self.sm {
            Breakpoint::Sm
        } else {
            Breakpoint::Xs
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A breakpoint-aware value with inheritance from smaller tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responsive<T> {
    /// Values indexed by `Breakpoint` ordinal. Slot 0 is always `Some`.
    values: [Option<T>; 5],
}

impl<T: Clone> Responsive<T> {
    /// Create a responsive value with a base value for `Xs`.
    #[must_use]
    pub fn new(base: T) -> Self {
        Self {
            values: [Some(base), None, None, None, None],
        }
    }

    /// Set the value for a breakpoint (builder pattern).
    #[must_use]
    pub fn at(mut self, bp: Breakpoint, value: T) -> Self {
        self.values[bp as usize] = Some(value);
        self
    }

    /// Resolve the value for `bp`, walking down to `Xs`.
    #[must_use]
    pub fn resolve(&self, bp: Breakpoint) -> &T {
        self.values[..=bp as usize]
            .iter()
            .rev()
            .find_map(Option::as_ref)
            .expect("Xs always has a value")
    }
}

/// How the split screen is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitMode {
    /// Panels stacked vertically; pointer input ignored.
    Stacked,
    /// Side-by-side panels driven by the pointer.
    Interactive,
}

impl SplitMode {
    /// Stacked below `lg`, interactive from `lg` up.
    #[must_use]
    pub fn responsive() -> Responsive<Self> {
        Responsive::new(Self::Stacked).at(Breakpoint::Lg, Self::Interactive)
    }

    /// Mode for a container `width` pixels wide with default breakpoints.
    #[must_use]
    pub fn for_width(width: f64) -> Self {
        *Self::responsive().resolve(Breakpoints::DEFAULT.classify(width))
    }
}
