//! Measurable items - the atoms a flow layout arranges.
//!
//! The engine treats items as opaque: all it asks of them is [`Measure`],
//! a pure size query under a proposed maximum. `TextElement` and
//! `BlockElement` are the built-in leaves; [`FlowItem`] dispatches over
//! them so heterogeneous collections can share one engine call.

use unicode_width::UnicodeWidthChar;

use crate::constraints::Constraints;
use crate::options::{BASE_FONT_SIZE, CHAR_WIDTH, LINE_HEIGHT};
use crate::primitives::Size;

// =========================================================================
// Measure Trait
// =========================================================================

/// Size measurement capability consumed by the flow engine.
///
/// Must be a pure function of the proposal for a given item snapshot: the
/// engine calls it multiple times per pass and assumes consistent results
/// for identical proposals.
pub trait Measure {
    /// Natural size of this item under the proposed maximum bounds.
    ///
    /// An item may ignore the proposal (a rigid block keeps its size even
    /// when it exceeds `max_width`), or adapt to it (text wraps within the
    /// width and grows taller).
    fn measure(&self, proposal: Constraints) -> Size;
}

// Measuring through a reference is free; this lets callers hand the engine
// slices of owned items or slices of borrows interchangeably.
impl<M: Measure + ?Sized> Measure for &M {
    fn measure(&self, proposal: Constraints) -> Size {
        (**self).measure(proposal)
    }
}

// =========================================================================
// Helper Functions
// =========================================================================

/// Estimate display width in cell units (1 for Latin, 2 for CJK, 0 for
/// combining marks).
pub(crate) fn unicode_display_width(text: &str) -> f32 {
    text.chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as f32)
        .sum()
}

// =========================================================================
// TextElement
// =========================================================================

/// A text item measured by character-cell estimation.
///
/// Width is estimated from unicode display cells; under a bounded width
/// proposal the text wraps, so its height depends on the proposed width.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    /// Text content.
    pub text: String,
    /// Font size (if different from default).
    pub size: Option<f32>,
}

impl TextElement {
    /// Create a new text element.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: None,
        }
    }

    /// Set the font size.
    ///
    /// Metrics scale proportionally; JetBrains Mono scales linearly, so
    /// the estimate stays a good approximation.
    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    #[inline]
    fn metrics(&self) -> (f32, f32) {
        match self.size {
            Some(fs) => {
                let scale = fs / BASE_FONT_SIZE;
                (CHAR_WIDTH * scale, LINE_HEIGHT * scale)
            }
            None => (CHAR_WIDTH, LINE_HEIGHT),
        }
    }
}

impl Measure for TextElement {
    fn measure(&self, proposal: Constraints) -> Size {
        let (cw, lh) = self.metrics();
        let natural = unicode_display_width(&self.text) * cw;

        // Wrap within a bounded width; height grows by whole lines.
        if proposal.max_width.is_finite() && proposal.max_width > 0.0 && natural > proposal.max_width
        {
            let lines = (natural / proposal.max_width).ceil();
            return Size::new(proposal.max_width, lines * lh);
        }
        Size::new(natural, lh)
    }
}

// =========================================================================
// BlockElement
// =========================================================================

/// A rigid fixed-size item (chip, badge, image slot).
///
/// Ignores the proposal entirely: a block wider than the available width
/// still reports its own size, which is how it ends up alone on an
/// overflow row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockElement {
    pub width: f32,
    pub height: f32,
}

impl BlockElement {
    /// Create a new block with a fixed size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Measure for BlockElement {
    fn measure(&self, _proposal: Constraints) -> Size {
        Size::new(self.width, self.height)
    }
}

// =========================================================================
// FlowItem Switchboard
// =========================================================================

/// Any item that can be flowed.
///
/// The dispatch layer between the engine and the concrete leaf types, so
/// a single `Vec<FlowItem>` can mix text and blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowItem {
    /// A text item.
    Text(TextElement),
    /// A rigid fixed-size item.
    Block(BlockElement),
}

impl Measure for FlowItem {
    fn measure(&self, proposal: Constraints) -> Size {
        match self {
            FlowItem::Text(t) => t.measure(proposal),
            FlowItem::Block(b) => b.measure(proposal),
        }
    }
}

impl From<TextElement> for FlowItem {
    fn from(element: TextElement) -> Self {
        FlowItem::Text(element)
    }
}

impl From<BlockElement> for FlowItem {
    fn from(element: BlockElement) -> Self {
        FlowItem::Block(element)
    }
}

// =========================================================================
// Tests
// =========================================================================
