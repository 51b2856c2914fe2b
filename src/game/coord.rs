use serde::{Deserialize, Serialize};

/// A (row, column) pair on the board, 0-indexed from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i32,
    pub column: i32,
}

impl Coordinate {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Whether this coordinate lies on a board of the given size
    pub fn is_within(&self, rows: i32, columns: i32) -> bool {
        (0..rows).contains(&self.row) && (0..columns).contains(&self.column)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, column): (i32, i32)) -> Self {
        Self::new(row, column)
    }
}

/// Plain component-wise sum, no wrapping
pub fn add(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate::new(a.row + b.row, a.column + b.column)
}

/// Floor modulo: the result is always in `[0, n)` for positive `n`, also for negative `x`
pub fn modulo(x: i32, n: i32) -> i32 {
    reduce(x as i64, n)
}

/// Works in `i64` so that neither the sum nor the reduction can overflow
fn reduce(x: i64, n: i32) -> i32 {
    x.rem_euclid(n as i64) as i32
}

/// Component-wise sum reduced onto a `rows` x `columns` torus.
///
/// Moving up from row 0 lands on `rows - 1`, moving left from column 0 lands
/// on `columns - 1`. Deltas of any size and sign are reduced exactly.
pub fn wrap_add(a: Coordinate, b: Coordinate, rows: i32, columns: i32) -> Coordinate {
    Coordinate::new(
        reduce(a.row as i64 + b.row as i64, rows),
        reduce(a.column as i64 + b.column as i64, columns),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_add() {
        let a = Coordinate::new(3, 4);
        assert_eq!(add(a, Coordinate::new(1, -2)), Coordinate::new(4, 2));
        assert_eq!(add(a, Coordinate::new(-5, 0)), Coordinate::new(-2, 4));
    }

    #[test]
    fn test_modulo_negative_inputs() {
        assert_eq!(modulo(-1, 21), 20);
        assert_eq!(modulo(-21, 21), 0);
        assert_eq!(modulo(-22, 21), 20);
        assert_eq!(modulo(21, 21), 0);
        assert_eq!(modulo(5, 21), 5);
    }

    #[test]
    fn test_wrap_over_edges() {
        assert_eq!(
            wrap_add(Coordinate::new(0, 0), Coordinate::new(-1, 0), 21, 21),
            Coordinate::new(20, 0)
        );
        assert_eq!(
            wrap_add(Coordinate::new(20, 0), Coordinate::new(1, 0), 21, 21),
            Coordinate::new(0, 0)
        );
        assert_eq!(
            wrap_add(Coordinate::new(4, 0), Coordinate::new(0, -1), 21, 21),
            Coordinate::new(4, 20)
        );
        assert_eq!(
            wrap_add(Coordinate::new(4, 20), Coordinate::new(0, 1), 21, 21),
            Coordinate::new(4, 0)
        );
    }

    #[test]
    fn test_wrap_non_square_board() {
        assert_eq!(
            wrap_add(Coordinate::new(0, 0), Coordinate::new(-1, -1), 5, 8),
            Coordinate::new(4, 7)
        );
        assert_eq!(
            wrap_add(Coordinate::new(2, 3), Coordinate::new(-13, 17), 5, 8),
            Coordinate::new(4, 4)
        );
    }

    #[test]
    fn test_extreme_inputs_stay_exact() {
        assert_eq!(modulo(i32::MAX - 1, i32::MAX), i32::MAX - 1);
        assert_eq!(modulo(i32::MIN, i32::MAX), i32::MAX - 1);
        assert_eq!(modulo(i32::MIN, 21), 19);

        // i32::MAX = 102261126 * 21 + 1, so one more step lands on row 2
        assert_eq!(
            wrap_add(Coordinate::new(i32::MAX, 0), Coordinate::new(1, 0), 21, 21),
            Coordinate::new(2, 0)
        );
        assert_eq!(
            wrap_add(Coordinate::new(0, i32::MIN), Coordinate::new(0, -1), 21, 21),
            Coordinate::new(0, 18)
        );
        assert_eq!(
            wrap_add(
                Coordinate::new(i32::MAX, i32::MIN),
                Coordinate::new(i32::MAX, i32::MIN),
                i32::MAX,
                i32::MAX
            ),
            Coordinate::new(0, i32::MAX - 2)
        );
    }

    #[test]
    fn test_is_within() {
        assert!(Coordinate::new(0, 0).is_within(21, 21));
        assert!(Coordinate::new(20, 20).is_within(21, 21));
        assert!(!Coordinate::new(21, 0).is_within(21, 21));
        assert!(!Coordinate::new(0, -1).is_within(21, 21));
    }
}
