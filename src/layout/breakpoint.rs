//! Responsive breakpoints.
//!
//! Widths are measured in terminal columns. `Lg` and `Md` show the full grid
//! and accept move/resize gestures; `Sm` and `Xs` stack every widget in a
//! single column and are presentation-only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A responsive breakpoint, ordered from largest to smallest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Wide terminals, four columns.
    Lg,
    /// Regular terminals, three columns.
    Md,
    /// Narrow terminals, one stacked column.
    Sm,
    /// Very narrow terminals, one stacked column.
    Xs,
}

impl Breakpoint {
    /// All breakpoints, largest first.
    pub const ALL: [Breakpoint; 4] = [Breakpoint::Lg, Breakpoint::Md, Breakpoint::Sm, Breakpoint::Xs];

    /// Breakpoints whose layout reports are authoritative, in priority order.
    pub const AUTHORITATIVE: [Breakpoint; 2] = [Breakpoint::Lg, Breakpoint::Md];

    /// Number of grid columns.
    pub fn columns(self) -> u16 {
        match self {
            Breakpoint::Lg => 4,
            Breakpoint::Md => 3,
            Breakpoint::Sm | Breakpoint::Xs => 1,
        }
    }

    /// Minimum terminal width (inclusive) for this breakpoint.
    pub fn min_width(self) -> u16 {
        match self {
            Breakpoint::Lg => 160,
            Breakpoint::Md => 96,
            Breakpoint::Sm => 48,
            Breakpoint::Xs => 0,
        }
    }

    /// The largest breakpoint whose minimum width fits `width`.
    pub fn for_width(width: u16) -> Self {
        Self::ALL
            .into_iter()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Breakpoint::Xs)
    }

    /// Single-column breakpoints render the stacked projection.
    pub fn is_stacked(self) -> bool {
        self.columns() == 1
    }

    /// Whether drag/resize reports at this breakpoint update the canonical layout.
    pub fn is_authoritative(self) -> bool {
        Self::AUTHORITATIVE.contains(&self)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Breakpoint::Lg => "lg",
            Breakpoint::Md => "md",
            Breakpoint::Sm => "sm",
            Breakpoint::Xs => "xs",
        };
        write!(f, "{}", s)
    }
}
