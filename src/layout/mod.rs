//! Layout engine for the dashboard grid.
//!
//! - [`rect`]: grid rectangles and overlap tests
//! - [`placement`]: default positions for newly added widgets
//! - [`breakpoint`]: responsive breakpoints and their column counts
//! - [`reconcile`]: folding rendering-surface reports back into widget records

pub mod breakpoint;
pub mod placement;
pub mod rect;
pub mod reconcile;

pub use breakpoint::Breakpoint;
pub use placement::{default_rect, place};
pub use rect::LayoutRect;
pub use reconcile::{reconcile, stacked_projection, BreakpointLayouts, GridItem};
