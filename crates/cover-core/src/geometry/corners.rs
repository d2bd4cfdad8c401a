//! Which outline corners are die-cut round
//!
//! Only the outer edges of the wrap are rounded. Wherever a panel meets the
//! spine the corner stays square, in every presentation.

use crate::model::Side;

/// What an outline is drawn for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineRole {
    /// One panel shown on its own
    Panel(Side),
    /// The full unfolded wrap: back, spine and front as one piece
    Wrap,
}

/// The set of rounded corners of a rectangular outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CornerSet {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_right: bool,
    pub bottom_left: bool,
}

impl CornerSet {
    pub const ALL: CornerSet = CornerSet {
        top_left: true,
        top_right: true,
        bottom_right: true,
        bottom_left: true,
    };

    pub const NONE: CornerSet = CornerSet {
        top_left: false,
        top_right: false,
        bottom_right: false,
        bottom_left: false,
    };

    pub const LEFT: CornerSet = CornerSet {
        top_left: true,
        top_right: false,
        bottom_right: false,
        bottom_left: true,
    };

    pub const RIGHT: CornerSet = CornerSet {
        top_left: false,
        top_right: true,
        bottom_right: true,
        bottom_left: false,
    };

    /// Rounded corners for an outline role.
    ///
    /// The front panel's outer edge is its right edge and the back panel's is
    /// its left edge. The wrap's left edge belongs to the back panel and its
    /// right edge to the front panel, so all four of its corners are outer.
    pub fn for_role(role: OutlineRole) -> Self {
        match role {
            OutlineRole::Panel(Side::Front) => Self::RIGHT,
            OutlineRole::Panel(Side::Back) => Self::LEFT,
            OutlineRole::Wrap => Self::ALL,
        }
    }

    pub fn rounded_count(&self) -> usize {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
        .iter()
        .filter(|rounded| **rounded)
        .count()
    }
}
