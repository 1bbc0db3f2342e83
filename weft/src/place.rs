//! Placement pass - turning a packed plan into absolute positions.
//!
//! Walks the plan's rows with a vertical cursor, resolves the inter-item
//! gap per row (fixed, or stretched to justify the row), aligns each item
//! vertically within its row, and emits one [`Placement`] per item for the
//! render sink. Positions are re-derived from the plan; nothing is packed
//! again here.

use tracing::trace;

use crate::constraints::Constraints;
use crate::element::Measure;
use crate::flow::FlowLayout;
use crate::options::{RowAlignment, SpacingDistribution};
use crate::plan::{LayoutPlan, Placement};
use crate::primitives::{Point, Rect, Size};

impl FlowLayout {
    /// Place a packed plan within `bounds`.
    ///
    /// `items` must be the sequence the plan was measured from. Item widths
    /// come from the plan; heights are re-measured under the resolved width
    /// so width-dependent items (wrapping text) report their placed height.
    /// An infinite `bounds.width` disables `FillWidth` justification.
    pub fn place<M: Measure>(
        &self,
        items: &[M],
        plan: &LayoutPlan,
        bounds: Rect,
    ) -> Vec<Placement> {
        let content_x = bounds.x + self.padding.left;
        let mut cursor_y = bounds.y + self.padding.top;
        let content_width = if bounds.width.is_finite() {
            (bounds.width - self.padding.horizontal()).max(0.0)
        } else {
            f32::INFINITY
        };

        let mut placements = Vec::with_capacity(plan.item_count());

        for (row_index, row) in plan.rows().iter().enumerate() {
            if row_index > 0 {
                cursor_y += self.line_spacing;
            }

            let gap = match self.distribution {
                SpacingDistribution::Fixed => self.spacing,
                SpacingDistribution::FillWidth => justified_gap(
                    row.content_width(),
                    content_width,
                    row.len().saturating_sub(1),
                    self.spacing,
                ),
            };

            let mut x = content_x;
            for index in row.start()..row.end() {
                let Some(item) = items.get(index) else {
                    // Plan refers past the item sequence; nothing to place.
                    break;
                };

                // Width from the plan; a miss means plan and items diverged,
                // so fall back to re-measuring on the fly.
                let width = plan
                    .width_of(index)
                    .unwrap_or_else(|| self.measure_item(item, plan.content_cap()).width);

                // Height may depend on width (text reflow), so re-query at
                // the resolved width rather than trusting a cached value.
                let height = item.measure(Constraints::with_max_width(width)).height;

                let y = cursor_y + align_offset(self.alignment, row.height(), height);
                placements.push(Placement {
                    index,
                    position: Point::new(x, y),
                    size: Size::new(width, height),
                });

                x += width + gap;
            }

            cursor_y += row.height();
        }

        trace!(
            "flow place: {} placements in {} rows at {:.1},{:.1}",
            placements.len(),
            plan.row_count(),
            bounds.x,
            bounds.y,
        );

        placements
    }
}

/// Vertical offset of an item within its row.
#[inline]
fn align_offset(alignment: RowAlignment, row_height: f32, item_height: f32) -> f32 {
    match alignment {
        RowAlignment::Top => 0.0,
        RowAlignment::Bottom => row_height - item_height,
        RowAlignment::Center => (row_height - item_height) / 2.0,
    }
}

/// Inter-item gap for a justified row.
///
/// Pure function of the packed row width, the available width, the gap
/// count, and the minimum spacing: leftover space is split evenly across
/// the gaps, never below the minimum. Rows with no gaps, or unbounded
/// widths, keep the minimum.
#[inline]
fn justified_gap(row_width: f32, available_width: f32, gaps: usize, min_spacing: f32) -> f32 {
    if gaps == 0 || !available_width.is_finite() {
        return min_spacing;
    }
    let leftover = (available_width - row_width).max(0.0);
    min_spacing + leftover / gaps as f32
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BlockElement, TextElement};
    use crate::options::LINE_HEIGHT;
    use crate::plan::RowPlan;

    fn blocks(sizes: &[(f32, f32)]) -> Vec<BlockElement> {
        sizes.iter().map(|&(w, h)| BlockElement::new(w, h)).collect()
    }

    fn measure_and_place(
        flow: &FlowLayout,
        items: &[BlockElement],
        max_width: f32,
        bounds: Rect,
    ) -> Vec<Placement> {
        let (_, plan) = flow.measure(items, Constraints::with_max_width(max_width));
        flow.place(items, &plan, bounds)
    }

    #[test]
    fn test_fixed_gap_positions() {
        let items = blocks(&[(50.0, 20.0), (50.0, 20.0), (50.0, 20.0)]);
        let flow = FlowLayout::new().spacing(10.0).align(RowAlignment::Top);
        let placed = measure_and_place(&flow, &items, 200.0, Rect::new(0.0, 0.0, 200.0, 100.0));

        assert_eq!(placed.len(), 3);
        assert_eq!(placed[0].position, Point::new(0.0, 0.0));
        assert_eq!(placed[1].position, Point::new(60.0, 0.0));
        assert_eq!(placed[2].position, Point::new(120.0, 0.0));
    }

    #[test]
    fn test_alignment_within_row() {
        // Row height 40; the 20-high item sits at 0 / 10 / 20 depending on
        // alignment.
        let items = blocks(&[(50.0, 40.0), (50.0, 20.0)]);
        let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);

        for (alignment, expected_y) in [
            (RowAlignment::Top, 0.0),
            (RowAlignment::Center, 10.0),
            (RowAlignment::Bottom, 20.0),
        ] {
            let flow = FlowLayout::new().spacing(10.0).align(alignment);
            let placed = measure_and_place(&flow, &items, 200.0, bounds);
            assert_eq!(placed[0].position.y, 0.0);
            assert_eq!(placed[1].position.y, expected_y);
        }
    }

    #[test]
    fn test_fill_width_justifies_row() {
        // leftover = 300 - (100 + 10 + 100) = 90; gap = 10 + 90 = 100.
        let items = blocks(&[(100.0, 20.0), (100.0, 20.0)]);
        let flow = FlowLayout::new()
            .spacing(10.0)
            .distribution(SpacingDistribution::FillWidth);
        let placed = measure_and_place(&flow, &items, 300.0, Rect::new(0.0, 0.0, 300.0, 50.0));

        assert_eq!(placed[0].position.x, 0.0);
        assert_eq!(placed[1].position.x, 200.0);
        // Justification property: last item's right edge meets the bounds.
        assert!((placed[1].position.x + placed[1].size.width - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_fill_width_single_item_keeps_min_spacing() {
        let items = blocks(&[(100.0, 20.0)]);
        let flow = FlowLayout::new()
            .spacing(10.0)
            .distribution(SpacingDistribution::FillWidth);
        let placed = measure_and_place(&flow, &items, 300.0, Rect::new(0.0, 0.0, 300.0, 50.0));

        assert_eq!(placed[0].position.x, 0.0);
        assert_eq!(placed[0].size.width, 100.0);
    }

    #[test]
    fn test_fill_width_unbounded_bounds_falls_back() {
        let items = blocks(&[(100.0, 20.0), (100.0, 20.0)]);
        let flow = FlowLayout::new()
            .spacing(10.0)
            .distribution(SpacingDistribution::FillWidth);
        let (_, plan) = flow.measure(&items, Constraints::UNBOUNDED);
        let placed = flow.place(&items, &plan, Rect::new(0.0, 0.0, f32::INFINITY, 50.0));

        assert_eq!(placed[1].position.x, 110.0);
    }

    #[test]
    fn test_vertical_cursor_between_rows() {
        // Two rows of height 20, line spacing 8: second row starts at 28.
        let items = blocks(&[(80.0, 20.0), (80.0, 20.0)]);
        let flow = FlowLayout::new()
            .spacing(10.0)
            .line_spacing(8.0)
            .align(RowAlignment::Top);
        let placed = measure_and_place(&flow, &items, 100.0, Rect::new(0.0, 0.0, 100.0, 100.0));

        assert_eq!(placed[0].position.y, 0.0);
        assert_eq!(placed[1].position.y, 28.0);
    }

    #[test]
    fn test_bounds_origin_offsets_everything() {
        let items = blocks(&[(50.0, 20.0), (50.0, 20.0)]);
        let flow = FlowLayout::new().spacing(10.0).align(RowAlignment::Top);
        let placed = measure_and_place(&flow, &items, 200.0, Rect::new(7.0, 9.0, 200.0, 100.0));

        assert_eq!(placed[0].position, Point::new(7.0, 9.0));
        assert_eq!(placed[1].position, Point::new(67.0, 9.0));
    }

    #[test]
    fn test_padding_offsets_content() {
        let items = blocks(&[(50.0, 20.0)]);
        let flow = FlowLayout::new().align(RowAlignment::Top).padding(12.0);
        let (_, plan) = flow.measure(&items, Constraints::with_max_width(200.0));
        let placed = flow.place(&items, &plan, Rect::new(0.0, 0.0, 200.0, 100.0));

        assert_eq!(placed[0].position, Point::new(12.0, 12.0));
    }

    #[test]
    fn test_placements_in_item_order() {
        let items = blocks(&[(80.0, 10.0), (80.0, 10.0), (80.0, 10.0), (80.0, 10.0)]);
        let flow = FlowLayout::new().spacing(10.0);
        let placed = measure_and_place(&flow, &items, 180.0, Rect::new(0.0, 0.0, 180.0, 100.0));

        let indices: Vec<usize> = placed.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_place_is_deterministic() {
        let items = blocks(&[(50.0, 20.0), (90.0, 30.0), (40.0, 10.0)]);
        let flow = FlowLayout::new().spacing(6.0);
        let (_, plan) = flow.measure(&items, Constraints::with_max_width(120.0));
        let bounds = Rect::new(0.0, 0.0, 120.0, 100.0);

        assert_eq!(flow.place(&items, &plan, bounds), flow.place(&items, &plan, bounds));
    }

    #[test]
    fn test_wrapped_text_height_rederived() {
        let text = TextElement::new("a".repeat(40));
        let natural = text.measure(Constraints::UNBOUNDED);
        let items = vec![text];

        let flow = FlowLayout::new().align(RowAlignment::Top);
        let cap = natural.width / 2.0;
        let (_, plan) = flow.measure(&items, Constraints::with_max_width(cap));
        let placed = flow.place(&items, &plan, Rect::new(0.0, 0.0, cap, 100.0));

        assert_eq!(placed[0].size.height, 2.0 * LINE_HEIGHT);
        assert_eq!(placed[0].size.width, cap);
    }

    #[test]
    fn test_width_lookup_miss_remeasures() {
        // Hand-build a plan whose widths vector is shorter than the row
        // span; placement must fall back to measuring the orphaned item
        // instead of faulting.
        let items = blocks(&[(50.0, 20.0), (70.0, 20.0)]);
        let plan = LayoutPlan {
            rows: vec![RowPlan {
                start: 0,
                count: 2,
                height: 20.0,
                content_width: 130.0,
            }],
            widths: vec![50.0], // second width missing
            size: Size::new(130.0, 20.0),
            content_cap: f32::INFINITY,
        };

        let flow = FlowLayout::new().spacing(10.0).align(RowAlignment::Top);
        let placed = flow.place(&items, &plan, Rect::new(0.0, 0.0, 200.0, 100.0));

        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].size.width, 50.0);
        // Re-measured on the fly from the item itself.
        assert_eq!(placed[1].size.width, 70.0);
        assert_eq!(placed[1].position.x, 60.0);
    }
}
