//! Flow layout engine - row packing.
//!
//! Items are laid out horizontally until the next one would exceed the
//! available width, then wrap to a new row. Packing is a greedy single
//! pass: no backtracking, no lookahead. The result is a [`LayoutPlan`]
//! that the placement pass consumes without repeating this work.

use tracing::trace;

use crate::constraints::Constraints;
use crate::element::Measure;
use crate::options::{DEFAULT_SPACING, Padding, RowAlignment, SpacingDistribution};
use crate::plan::{LayoutPlan, RowPlan};
use crate::primitives::Size;

// =========================================================================
// FlowLayout
// =========================================================================

/// A row-wrapping layout engine.
///
/// Configure with the builder methods, then call [`measure`] to pack items
/// into rows and [`place`] to turn the resulting plan into absolute
/// positions. The engine is stateless across calls: both methods are pure
/// functions of their inputs.
///
/// [`measure`]: FlowLayout::measure
/// [`place`]: FlowLayout::place
#[derive(Debug, Clone)]
pub struct FlowLayout {
    /// Vertical alignment of items within their row.
    pub(crate) alignment: RowAlignment,
    /// Minimum horizontal spacing between items.
    pub(crate) spacing: f32,
    /// Vertical spacing between rows.
    pub(crate) line_spacing: f32,
    /// Inter-item gap policy.
    pub(crate) distribution: SpacingDistribution,
    /// Padding around the flowed content.
    pub(crate) padding: Padding,
}

impl FlowLayout {
    /// Create a new flow layout with default configuration.
    pub fn new() -> Self {
        Self {
            alignment: RowAlignment::default(),
            spacing: DEFAULT_SPACING,
            line_spacing: DEFAULT_SPACING,
            distribution: SpacingDistribution::default(),
            padding: Padding::default(),
        }
    }

    /// Set vertical alignment of items within their row.
    pub fn align(mut self, alignment: RowAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set minimum horizontal spacing between items.
    ///
    /// Precondition: non-negative. Negative values are taken as given.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set vertical spacing between wrapped rows.
    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the inter-item gap policy.
    pub fn distribution(mut self, distribution: SpacingDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Set padding around content (uniform on all sides).
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = Padding::all(padding);
        self
    }

    /// Set custom padding.
    pub fn padding_custom(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    // =====================================================================
    // Measurement pass
    // =====================================================================

    /// Pack items into rows under the given constraints.
    ///
    /// Returns the total bounding size and the packed plan. Each item is
    /// measured under a width proposal of `min(naturalWidth, cap)` when the
    /// width is bounded, so clamping happens at measurement time and items
    /// that adapt to width (text) resolve their wrapped height here.
    ///
    /// A row is closed when appending the next item would exceed the cap
    /// and the row already holds at least one item; a single item wider
    /// than the cap is accepted as an overflow row.
    pub fn measure<M: Measure>(&self, items: &[M], constraints: Constraints) -> (Size, LayoutPlan) {
        let cap = if constraints.has_bounded_width() {
            (constraints.max_width - self.padding.horizontal()).max(0.0)
        } else {
            f32::INFINITY
        };

        let mut rows: Vec<RowPlan> = Vec::new();
        let mut widths: Vec<f32> = Vec::with_capacity(items.len());
        let mut row_start = 0usize;
        let mut row_width = 0.0f32;
        let mut row_height = 0.0f32;
        let mut widest = 0.0f32;
        let mut total_height = 0.0f32;

        for (index, item) in items.iter().enumerate() {
            let size = self.measure_item(item, cap);
            let in_row = index - row_start;

            let appended = if in_row == 0 {
                size.width
            } else {
                row_width + self.spacing + size.width
            };

            if cap.is_finite() && appended > cap && in_row > 0 {
                // Close the current row and start a new one with this item.
                widest = widest.max(row_width);
                if !rows.is_empty() {
                    total_height += self.line_spacing;
                }
                total_height += row_height;
                rows.push(RowPlan {
                    start: row_start,
                    count: in_row,
                    height: row_height,
                    content_width: row_width,
                });

                row_start = index;
                row_width = size.width;
                row_height = size.height;
            } else {
                row_width = appended;
                row_height = row_height.max(size.height);
            }
            widths.push(size.width);
        }

        // Flush the trailing row.
        if row_start < items.len() {
            widest = widest.max(row_width);
            if !rows.is_empty() {
                total_height += self.line_spacing;
            }
            total_height += row_height;
            rows.push(RowPlan {
                start: row_start,
                count: items.len() - row_start,
                height: row_height,
                content_width: row_width,
            });
        }

        let size = if rows.is_empty() {
            Size::ZERO
        } else {
            // Report the widest row, clamped to the available width: an
            // overflow row never widens the report past the cap.
            let content_width = if cap.is_finite() { widest.min(cap) } else { widest };
            let width = if constraints.has_bounded_width() {
                (content_width + self.padding.horizontal()).min(constraints.max_width)
            } else {
                content_width + self.padding.horizontal()
            };
            Size::new(width, total_height + self.padding.vertical())
        };

        trace!(
            "flow measure: {} items into {} rows, size {:.1}x{:.1}",
            items.len(),
            rows.len(),
            size.width,
            size.height,
        );

        (
            size,
            LayoutPlan {
                rows,
                widths,
                size,
                content_cap: cap,
            },
        )
    }

    /// Calculate the total height needed for a given available width.
    pub fn height_for_width<M: Measure>(&self, items: &[M], available_width: f32) -> f32 {
        self.measure(items, Constraints::with_max_width(available_width))
            .0
            .height
    }

    /// Measure one item, proposing `min(naturalWidth, cap)` when bounded.
    pub(crate) fn measure_item<M: Measure>(&self, item: &M, cap: f32) -> Size {
        let natural = item.measure(Constraints::UNBOUNDED);
        if cap.is_finite() {
            item.measure(Constraints::with_max_width(natural.width.min(cap)))
        } else {
            natural
        }
    }
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
