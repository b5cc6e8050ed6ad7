//! Neighbor accessor layouts for each template shape.
//!
//! A layout names each template slot and fixes its offset from the rule
//! anchor. Slot order matches [`Template::cells`](crate::Template)
//! enumeration order, so slot `i` of a template always pairs with
//! accessor `i` of its layout.
//!
//! The symmetric shapes have two layouts with identical names but
//! mirrored offsets; which one is active is re-chosen per attempt.

use crate::template::Shape;

/// Which of a symmetric shape's two mirrored layouts is active for one
/// attempt.
///
/// Chosen by an unbiased coin on every attempt and threaded explicitly
/// through matcher, condition, and writer resolution. Non-symmetric
/// shapes always run `Primary`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// The partner cell sits before the anchor (above / left).
    Primary,
    /// The partner cell sits after the anchor (below / right).
    Secondary,
}

/// One named accessor: a template slot's offset from the anchor.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Accessor {
    pub name: &'static str,
    pub dx: i32,
    pub dy: i32,
}

const fn acc(name: &'static str, dx: i32, dy: i32) -> Accessor {
    Accessor { name, dx, dy }
}

/// A shape's accessor table for one orientation.
#[derive(Debug)]
pub(crate) struct Layout {
    accessors: &'static [Accessor],
}

impl Layout {
    /// Offset of slot `slot`.
    pub fn offset(&self, slot: usize) -> (i32, i32) {
        let a = &self.accessors[slot];
        (a.dx, a.dy)
    }

    /// Slot index of the named accessor, if the shape exposes it.
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.accessors.iter().position(|a| a.name == name)
    }
}

static SINGLE: Layout = Layout {
    accessors: &[acc("c", 0, 0)],
};

static FULL: Layout = Layout {
    accessors: &[
        acc("nw", -1, -1),
        acc("n", 0, -1),
        acc("ne", 1, -1),
        acc("w", -1, 0),
        acc("c", 0, 0),
        acc("e", 1, 0),
        acc("sw", -1, 1),
        acc("s", 0, 1),
        acc("se", 1, 1),
    ],
};

static VERTICAL: Layout = Layout {
    accessors: &[acc("n", 0, -1), acc("c", 0, 0), acc("s", 0, 1)],
};

static HORIZONTAL: Layout = Layout {
    accessors: &[acc("w", -1, 0), acc("c", 0, 0), acc("e", 1, 0)],
};

static SYM_V_UP: Layout = Layout {
    accessors: &[acc("a", 0, -1), acc("b", 0, 0)],
};

static SYM_V_DOWN: Layout = Layout {
    accessors: &[acc("a", 0, 1), acc("b", 0, 0)],
};

static SYM_H_LEFT: Layout = Layout {
    accessors: &[acc("a", -1, 0), acc("b", 0, 0)],
};

static SYM_H_RIGHT: Layout = Layout {
    accessors: &[acc("a", 1, 0), acc("b", 0, 0)],
};

/// The layout pair for a shape: `[Primary, Secondary]`.
///
/// Non-symmetric shapes repeat the same layout in both slots so callers
/// can index by [`Orientation`] unconditionally.
pub(crate) fn layouts(shape: Shape) -> [&'static Layout; 2] {
    match shape {
        Shape::Single => [&SINGLE, &SINGLE],
        Shape::Full => [&FULL, &FULL],
        Shape::Vertical => [&VERTICAL, &VERTICAL],
        Shape::Horizontal => [&HORIZONTAL, &HORIZONTAL],
        Shape::SymmetricVertical => [&SYM_V_UP, &SYM_V_DOWN],
        Shape::SymmetricHorizontal => [&SYM_H_LEFT, &SYM_H_RIGHT],
    }
}

/// Whether the shape's orientation is re-chosen per attempt.
pub(crate) fn is_symmetric(shape: Shape) -> bool {
    matches!(
        shape,
        Shape::SymmetricVertical | Shape::SymmetricHorizontal
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_layout_is_row_major() {
        let [l, _] = layouts(Shape::Full);
        assert_eq!(l.slot_of("nw"), Some(0));
        assert_eq!(l.slot_of("c"), Some(4));
        assert_eq!(l.slot_of("se"), Some(8));
        assert_eq!(l.offset(4), (0, 0));
        assert_eq!(l.offset(1), (0, -1)); // n is above the anchor
    }

    #[test]
    fn symmetric_layouts_mirror() {
        let [up, down] = layouts(Shape::SymmetricVertical);
        assert_eq!(up.offset(0), (0, -1));
        assert_eq!(down.offset(0), (0, 1));
        // Anchor slot is shared, and slot names agree across orientations.
        assert_eq!(up.offset(1), (0, 0));
        assert_eq!(down.offset(1), (0, 0));
        for name in ["a", "b"] {
            assert_eq!(up.slot_of(name), down.slot_of(name));
        }
    }

    #[test]
    fn line_layout_anchors_at_center() {
        let [v, _] = layouts(Shape::Vertical);
        assert_eq!(v.slot_of("c"), Some(1));
        assert_eq!(v.offset(0), (0, -1));
        assert_eq!(v.offset(2), (0, 1));
        let [h, _] = layouts(Shape::Horizontal);
        assert_eq!(h.offset(0), (-1, 0));
        assert_eq!(h.offset(2), (1, 0));
    }

    #[test]
    fn unknown_accessor_is_none() {
        let [l, _] = layouts(Shape::Vertical);
        assert_eq!(l.slot_of("nw"), None);
    }
}
