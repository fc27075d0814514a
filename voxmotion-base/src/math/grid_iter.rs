use core::iter::FusedIterator;
use core::ops::Range;

use crate::math::{Cube, GridAab, GridCoordinate, GridPoint};

/// Iterator produced by [`GridAab::interior_iter()`].
#[derive(Clone, Debug)]
pub struct GridIter {
    x_range: Range<GridCoordinate>,
    y_range: Range<GridCoordinate>,
    z_range: Range<GridCoordinate>,
    cube: GridPoint,
}

impl GridIter {
    #[inline]
    pub(in crate::math) fn new(bounds: GridAab) -> Self {
        Self {
            x_range: bounds.x_range(),
            y_range: bounds.y_range(),
            z_range: bounds.z_range(),
            cube: if bounds.is_empty() {
                // The next() algorithm assumes that if self.cube.x is in self.x_range then that
                // cube should be produced, but this is true only in the nonempty case.
                bounds.upper_bounds()
            } else {
                bounds.lower_bounds()
            },
        }
    }
}

impl Iterator for GridIter {
    type Item = Cube;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.cube.x >= self.x_range.end {
            return None;
        }
        let result = self.cube;

        self.cube.z += 1;
        if self.cube.z >= self.z_range.end {
            self.cube.z = self.z_range.start;
            self.cube.y += 1;
            if self.cube.y >= self.y_range.end {
                self.cube.y = self.y_range.start;
                self.cube.x += 1;
                // When x becomes out of bounds, that signals the end.
            }
        }

        Some(result.into())
    }

    #[allow(clippy::missing_inline_in_public_items, reason = "unclear benefit")]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from((self.x_range.end - self.cube.x) - 1) {
            Err(_) => {
                // x has hit the end, no items left
                (0, Some(0))
            }
            Ok(planes_remaining) => {
                let rows_remaining = planes_remaining * self.y_range.len()
                    + usize::try_from((self.y_range.end - self.cube.y) - 1).unwrap_or(0);
                let cubes_remaining = rows_remaining * self.z_range.len()
                    + usize::try_from(self.z_range.end - self.cube.z).unwrap_or(0);

                (cubes_remaining, Some(cubes_remaining))
            }
        }
    }
}

impl ExactSizeIterator for GridIter {}
impl FusedIterator for GridIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn zero_items() {
        fn assert_no_items(b: GridAab) {
            assert_eq!(b.interior_iter().collect::<Vec<_>>(), vec![], "{b:?}");
        }

        assert_no_items(GridAab::from_lower_upper([0, 0, 0], [0, 0, 0]));
        assert_no_items(GridAab::from_lower_upper([0, 0, 0], [0, 0, 1]));
        assert_no_items(GridAab::from_lower_upper([0, 0, 0], [0, 1, 0]));
        assert_no_items(GridAab::from_lower_upper([0, 0, 0], [1, 0, 0]));
        assert_no_items(GridAab::from_lower_upper([0, 0, 0], [0, 1, 1]));
    }

    #[test]
    fn size_hint_counts_down() {
        let b = GridAab::from_lower_upper([0, 0, 0], [2, 3, 4]);
        let expected_size = 2 * 3 * 4;
        let mut iter = b.interior_iter();

        for remaining in (1..=expected_size).rev() {
            assert_eq!(iter.size_hint(), (remaining, Some(remaining)));
            assert!(iter.next().is_some());
        }
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert!(iter.next().is_none());
        assert_eq!(iter.size_hint(), (0, Some(0)));
    }

    #[test]
    fn all_cubes_are_contained() {
        let b = GridAab::from_lower_upper([-1, 2, -3], [1, 4, 0]);
        let cubes: Vec<Cube> = b.interior_iter().collect();
        assert_eq!(cubes.len(), 2 * 2 * 3);
        assert!(cubes.iter().all(|&cube| b.contains_cube(cube)));
    }
}
