use crate::units::*;

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (typically, lower-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (typically, lower-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (typically, upper-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (typically, upper-right) corner.
    pub y2: Pt,
}

impl Rect {
    /// Build a rectangle from its left, bottom, right and top edges, in whatever order
    /// the corners were given
    pub fn from_edges(left: Pt, bottom: Pt, right: Pt, top: Pt) -> Rect {
        Rect {
            x1: left.min(right),
            y1: bottom.min(top),
            x2: left.max(right),
            y2: bottom.max(top),
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_normalised() {
        let r = Rect::from_edges(Pt(10.0), Pt(50.0), Pt(0.0), Pt(20.0));
        assert_eq!(r.x1, Pt(0.0));
        assert_eq!(r.y1, Pt(20.0));
        assert_eq!(r.width(), Pt(10.0));
        assert_eq!(r.height(), Pt(30.0));
    }
}
