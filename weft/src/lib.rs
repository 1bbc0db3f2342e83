//! Weft: a row-wrapping flow layout engine.
//!
//! Given an ordered sequence of measurable items and an available width,
//! weft packs the items into left-to-right rows — wrapping whenever the
//! next item would overflow — and reports the overall bounding size plus
//! an absolute placement for every item.
//!
//! # Architecture
//!
//! ```text
//! measure(items, constraints) -> (Size, LayoutPlan)   row packing
//! place(items, plan, bounds)  -> Vec<Placement>       positioning
//! ```
//!
//! The two phases are independent pure functions connected by the
//! [`LayoutPlan`] value: `measure` does all the packing work, `place`
//! cheaply re-derives positions from the plan. The engine never draws and
//! keeps no state between calls.
//!
//! # Usage
//!
//! ```
//! use weft::{Constraints, FlowLayout, FlowItem, BlockElement, TextElement, Rect};
//!
//! let items: Vec<FlowItem> = vec![
//!     TextElement::new("alpha").into(),
//!     BlockElement::new(40.0, 24.0).into(),
//!     TextElement::new("beta").into(),
//! ];
//!
//! let flow = FlowLayout::new().spacing(6.0).line_spacing(4.0);
//! let (size, plan) = flow.measure(&items, Constraints::with_max_width(240.0));
//! let placements = flow.place(&items, &plan, Rect::new(0.0, 0.0, size.width, size.height));
//! assert_eq!(placements.len(), items.len());
//! ```

// Core primitives
pub mod constraints;
pub mod primitives;

// Configuration surface
pub mod options;

// Items and their measurement seam
pub mod element;

// Packing result
pub mod plan;

// The engine: packing pass, then placement pass
pub mod flow;
pub mod place;

// Re-export core types
pub use constraints::Constraints;
pub use element::{BlockElement, FlowItem, Measure, TextElement};
pub use flow::FlowLayout;
pub use options::{DEFAULT_SPACING, Padding, RowAlignment, SpacingDistribution};
pub use plan::{LayoutPlan, Placement, RowPlan};
pub use primitives::{Point, Rect, Size};
