use derive_more::{Add, AddAssign, Deref, Display, From, Into, Mul, MulAssign, Sub, SubAssign, Sum};

/// Points, the native unit of PDF user space (1/72 of an inch). All layout
/// calculations in this crate are carried out in points.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Sum,
    Deref,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

/// Inches, convertible into [Pt]
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Mul, From, Into)]
pub struct In(pub f32);

/// Millimetres, convertible into [Pt]
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Mul, From, Into)]
pub struct Mm(pub f32);

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 * 72.0 / 25.4)
    }
}

impl std::ops::Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl std::ops::Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl Pt {
    /// Round down to the nearest whole point
    pub fn floor(self) -> Pt {
        Pt(self.0.floor())
    }

    /// Round to the nearest whole point, halves away from zero
    pub fn round(self) -> Pt {
        Pt(self.0.round())
    }

    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inches_and_millimetres_convert_to_points() {
        assert_eq!(Pt::from(In(0.5)), Pt(36.0));
        let a4_width: Pt = Mm(210.0).into();
        assert!((a4_width.0 - 595.2756).abs() < 0.001);
    }

    #[test]
    fn arithmetic_stays_in_points() {
        let mut p = Pt(10.0) + Pt(5.0) - Pt(3.0);
        p += Pt(1.0);
        assert_eq!(p * 2.0, Pt(26.0));
        assert_eq!(p / 2.0, Pt(6.5));
        assert_eq!(-p, Pt(-13.0));
        let total: Pt = [Pt(1.5), Pt(2.5)].into_iter().sum();
        assert_eq!(total, Pt(4.0));
    }
}
