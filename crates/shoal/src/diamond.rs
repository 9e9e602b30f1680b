//! Precomputed Manhattan-radius neighbourhoods.
//!
//! A [`Diamond`] of radius `R` is the set of offsets `(dx, dy)` with
//! `|dx| + |dy| <= R`, excluding the origin. It holds `2R² + 2R` offsets and is
//! built once, then reused for every scan.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::{Coord, Torus};

/// Offset table for a fixed Manhattan radius.
///
/// Offsets are ordered row by row: `dy` ascending, then `dx` ascending.
///
/// # Example
///
/// ```
/// use shoal::Diamond;
///
/// let diamond = Diamond::new(4);
/// assert_eq!(diamond.len(), 40);
/// assert_eq!(diamond.offsets()[0], glam::IVec2::new(0, -4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diamond {
    radius: u32,
    offsets: Vec<IVec2>,
}

impl Diamond {
    /// Largest radius a table is built for.
    pub const MAX_RADIUS: u32 = 64;

    /// Build the offset table for `radius`.
    ///
    /// # Panics
    ///
    /// Panics if `radius` exceeds [`Diamond::MAX_RADIUS`]. Use
    /// [`Diamond::try_new`] for radii that come from outside input.
    #[must_use]
    pub fn new(radius: u32) -> Self {
        match Self::try_new(radius) {
            Some(diamond) => diamond,
            None => panic!(
                "diamond radius {radius} exceeds the maximum of {}",
                Self::MAX_RADIUS
            ),
        }
    }

    /// Build the offset table, or `None` if `radius` exceeds
    /// [`Diamond::MAX_RADIUS`].
    #[must_use]
    pub fn try_new(radius: u32) -> Option<Self> {
        if radius > Self::MAX_RADIUS {
            return None;
        }
        let r = i32::try_from(radius).ok()?;
        let mut offsets = Vec::with_capacity(Self::expected_len(radius));
        for dy in -r..=r {
            let span = r - dy.abs();
            for dx in -span..=span {
                if dx == 0 && dy == 0 {
                    continue;
                }
                offsets.push(IVec2::new(dx, dy));
            }
        }
        Some(Self { radius, offsets })
    }

    /// Number of offsets a diamond of `radius` holds: `2R² + 2R`, saturating
    /// at `usize::MAX`.
    #[must_use]
    pub const fn expected_len(radius: u32) -> usize {
        let r = radius as usize;
        r.saturating_mul(r).saturating_add(r).saturating_mul(2)
    }

    /// The radius this table was built for.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// The offsets, origin excluded.
    #[must_use]
    pub fn offsets(&self) -> &[IVec2] {
        &self.offsets
    }

    /// Number of offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True only for radius zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// True if every offset maps to a distinct cell other than the centre.
    ///
    /// Fails on grids narrower or shorter than the diamond's diameter, where
    /// wrapped offsets start to coincide.
    #[must_use]
    pub fn fits(&self, torus: &Torus) -> bool {
        let diameter = u64::from(self.radius) * 2 + 1;
        u64::from(torus.width().unsigned_abs()) >= diameter
            && u64::from(torus.height().unsigned_abs()) >= diameter
    }

    /// Wrapped cells around `center`, in table order.
    ///
    /// On grids the diamond does not [fit](Diamond::fits) the same cell may be
    /// yielded more than once, and the centre itself may appear.
    pub fn cells_around<'a>(
        &'a self,
        torus: &'a Torus,
        center: Coord,
    ) -> impl Iterator<Item = Coord> + 'a {
        self.offsets
            .iter()
            .map(move |offset| torus.wrap(center.offset(*offset)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sizes() {
        for radius in 0..8 {
            let diamond = Diamond::new(radius);
            assert_eq!(diamond.len(), Diamond::expected_len(radius));
        }
        assert!(Diamond::new(0).is_empty());
        assert_eq!(Diamond::new(4).len(), 40);
    }

    #[test]
    fn test_oversized_radius_is_rejected() {
        assert!(Diamond::try_new(Diamond::MAX_RADIUS).is_some());
        assert!(Diamond::try_new(Diamond::MAX_RADIUS + 1).is_none());
        assert!(Diamond::try_new(100_000).is_none());
        assert!(Diamond::try_new(u32::MAX).is_none());
    }

    #[test]
    fn test_expected_len_saturates() {
        assert_eq!(Diamond::expected_len(64), 8320);
        assert_eq!(Diamond::expected_len(u32::MAX), usize::MAX);
    }

    #[test]
    #[should_panic(expected = "exceeds the maximum")]
    fn test_new_panics_above_max() {
        let _ = Diamond::new(u32::MAX);
    }

    #[test]
    fn test_all_within_radius_and_unique() {
        let diamond = Diamond::new(4);
        let mut seen = HashSet::new();
        for offset in diamond.offsets() {
            assert!(offset.x.abs() + offset.y.abs() <= 4);
            assert_ne!(*offset, IVec2::ZERO);
            assert!(seen.insert(*offset));
        }
    }

    #[test]
    fn test_row_order() {
        let diamond = Diamond::new(4);
        let head: Vec<_> = diamond.offsets()[..4].to_vec();
        assert_eq!(
            head,
            vec![
                IVec2::new(0, -4),
                IVec2::new(-1, -3),
                IVec2::new(0, -3),
                IVec2::new(1, -3),
            ]
        );
        assert_eq!(*diamond.offsets().last().unwrap(), IVec2::new(0, 4));
    }

    #[test]
    fn test_fits() {
        let diamond = Diamond::new(4);
        assert!(diamond.fits(&Torus::new(9, 9).unwrap()));
        assert!(!diamond.fits(&Torus::new(8, 32).unwrap()));
    }

    #[test]
    fn test_cells_around_wraps() {
        let torus = Torus::new(16, 16).unwrap();
        let diamond = Diamond::new(1);
        let cells: Vec<_> = diamond.cells_around(&torus, Coord::new(0, 0)).collect();
        assert_eq!(
            cells,
            vec![
                Coord::new(0, 15),
                Coord::new(15, 0),
                Coord::new(1, 0),
                Coord::new(0, 1),
            ]
        );
    }
}
