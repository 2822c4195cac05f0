use std::ops::Not;

use super::vector::Vector;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisDirection {
    X,
    Y,
}

impl Not for AxisDirection {
    type Output = Self;
    fn not(self) -> Self::Output {
        use AxisDirection::*;
        match self {
            X => Y,
            Y => X,
        }
    }
}

impl From<AxisDirection> for Vector {
    fn from(axis: AxisDirection) -> Self {
        use AxisDirection::*;
        match axis {
            X => (1., 0.).into(),
            Y => (0., 1.).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::mem::size_of;

    use super::*;

    #[test]
    fn test_axis_direction_size() {
        assert_eq!(size_of::<AxisDirection>(), size_of::<u8>());
    }

    #[test]
    fn test_axis_direction_not() {
        assert_eq!(!AxisDirection::X, AxisDirection::Y);
        assert_eq!(!!AxisDirection::Y, AxisDirection::Y);
        assert_eq!(Vector::from(AxisDirection::Y), Vector::new(0., 1.));
    }
}
