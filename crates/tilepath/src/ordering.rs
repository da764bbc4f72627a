//! Coordinate hashing and lexicographic priority comparison.

use std::cmp::Ordering;

use tilepath_core::Coord;

/// Pack a coordinate into a single 64-bit key.
///
/// Distinct coordinates always produce distinct keys.
#[inline]
pub fn hash_coord(c: Coord) -> u64 {
    ((c.x as u32 as u64) << 32) | (c.y as u32 as u64)
}

/// Whether two coordinates name the same cell.
#[inline]
pub fn same_position(a: Coord, b: Coord) -> bool {
    a.x == b.x && a.y == b.y
}

/// One component of a priority tuple.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Priority {
    Num(i64),
    /// `true` ranks as `1`, `false` as `-1`.
    Flag(bool),
    /// Ranks as `0`.
    Missing,
}

impl Priority {
    #[inline]
    fn rank(self) -> i64 {
        match self {
            Priority::Num(n) => n,
            Priority::Flag(true) => 1,
            Priority::Flag(false) => -1,
            Priority::Missing => 0,
        }
    }
}

impl From<i64> for Priority {
    fn from(n: i64) -> Self {
        Priority::Num(n)
    }
}

impl From<i32> for Priority {
    fn from(n: i32) -> Self {
        Priority::Num(n.into())
    }
}

impl From<usize> for Priority {
    fn from(n: usize) -> Self {
        Priority::Num(n as i64)
    }
}

impl From<bool> for Priority {
    fn from(b: bool) -> Self {
        Priority::Flag(b)
    }
}

impl<T: Into<Priority>> From<Option<T>> for Priority {
    fn from(v: Option<T>) -> Self {
        v.map_or(Priority::Missing, Into::into)
    }
}

/// Compare two priority tuples element by element.
///
/// The shorter tuple is padded with [`Priority::Missing`]. When every element
/// ties, `tie_breaker` (if any) decides.
pub fn compare_by_priority(
    a: &[Priority],
    b: &[Priority],
    tie_breaker: Option<&dyn Fn(&[Priority], &[Priority]) -> Ordering>,
) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(Priority::Missing).rank();
        let y = b.get(i).copied().unwrap_or(Priority::Missing).rank();
        match x.cmp(&y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    tie_breaker.map_or(Ordering::Equal, |tb| tb(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Priority::*;

    #[test]
    fn hash_coord_is_injective_on_signs() {
        let keys = [
            hash_coord(Coord::new(1, 2)),
            hash_coord(Coord::new(2, 1)),
            hash_coord(Coord::new(-1, 2)),
            hash_coord(Coord::new(1, -2)),
            hash_coord(Coord::new(0, 0)),
        ];
        for i in 0..keys.len() {
            for j in i + 1..keys.len() {
                assert_ne!(keys[i], keys[j]);
            }
        }
        assert_eq!(hash_coord(Coord::new(5, 9)), hash_coord(Coord::new(5, 9)));
    }

    #[test]
    fn same_position_compares_values() {
        assert!(same_position(Coord::new(3, 3), Coord::new(3, 3)));
        assert!(!same_position(Coord::new(3, 3), Coord::new(3, 4)));
    }

    #[test]
    fn lexicographic() {
        assert_eq!(compare_by_priority(&[Num(1), Num(9)], &[Num(2), Num(0)], None), Ordering::Less);
        assert_eq!(compare_by_priority(&[Num(2), Num(3)], &[Num(2), Num(1)], None), Ordering::Greater);
        assert_eq!(compare_by_priority(&[Num(2), Num(3)], &[Num(2), Num(3)], None), Ordering::Equal);
    }

    #[test]
    fn flags_and_missing() {
        // false < missing < true
        assert_eq!(compare_by_priority(&[Flag(false)], &[Missing], None), Ordering::Less);
        assert_eq!(compare_by_priority(&[Flag(true)], &[Missing], None), Ordering::Greater);
        // Shorter tuples are padded with Missing.
        assert_eq!(compare_by_priority(&[Num(1)], &[Num(1), Num(0)], None), Ordering::Equal);
        assert_eq!(compare_by_priority(&[Num(1)], &[Num(1), Num(-3)], None), Ordering::Greater);
        assert_eq!(Priority::from(None::<i32>), Missing);
        assert_eq!(Priority::from(Some(true)), Flag(true));
    }

    #[test]
    fn tie_breaker_only_on_full_tie() {
        let reverse = |_: &[Priority], _: &[Priority]| Ordering::Greater;
        assert_eq!(
            compare_by_priority(&[Num(4)], &[Num(4)], Some(&reverse)),
            Ordering::Greater
        );
        assert_eq!(
            compare_by_priority(&[Num(3)], &[Num(4)], Some(&reverse)),
            Ordering::Less
        );
    }
}
