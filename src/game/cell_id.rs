use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::coord::Coordinate;
use super::error::GameError;

const SEPARATOR: char = '-';

/// Stable key of a board cell, `"{row}-{column}"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(String);

impl CellId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Coordinate> for CellId {
    fn from(coord: Coordinate) -> Self {
        coord_to_id(coord)
    }
}

impl TryFrom<&CellId> for Coordinate {
    type Error = GameError;

    fn try_from(id: &CellId) -> Result<Self, Self::Error> {
        id_to_coord(id)
    }
}

impl FromStr for CellId {
    type Err = GameError;

    /// Accepts only canonical identifiers, i.e. ones `coord_to_id` could produce
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coord = parse(s)?;
        Ok(coord_to_id(coord))
    }
}

pub fn coord_to_id(coord: Coordinate) -> CellId {
    CellId(format!("{}{}{}", coord.row, SEPARATOR, coord.column))
}

/// Inverse of [`coord_to_id`]
pub fn id_to_coord(id: &CellId) -> Result<Coordinate, GameError> {
    parse(id.as_str())
}

fn parse(s: &str) -> Result<Coordinate, GameError> {
    let malformed = || GameError::MalformedIdentifier(s.to_string());

    let (row, column) = s.split_once(SEPARATOR).ok_or_else(malformed)?;
    let row = row.parse::<i32>().map_err(|_| malformed())?;
    let column = column.parse::<i32>().map_err(|_| malformed())?;
    let coord = Coordinate::new(row, column);

    // Rejects spellings like "+1-2" or "01-2" that would break injectivity
    if coord_to_id(coord).as_str() != s {
        return Err(malformed());
    }

    Ok(coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding() {
        assert_eq!(coord_to_id(Coordinate::new(10, 11)).as_str(), "10-11");
        assert_eq!(coord_to_id(Coordinate::new(0, 0)).as_str(), "0-0");
    }

    #[test]
    fn test_round_trip_whole_board() {
        for row in 0..21 {
            for column in 0..21 {
                let coord = Coordinate::new(row, column);
                assert_eq!(id_to_coord(&coord_to_id(coord)), Ok(coord));
            }
        }
    }

    #[test]
    fn test_distinct_cells_get_distinct_ids() {
        // "1-11" vs "11-1" is the classic ambiguity for unseparated encodings
        assert_ne!(
            coord_to_id(Coordinate::new(1, 11)),
            coord_to_id(Coordinate::new(11, 1))
        );
    }

    #[test]
    fn test_malformed_identifiers() {
        for bad in ["", "12", "a-b", "1-", "-1", "1-2-3", "+1-2", "01-2", " 1-2"] {
            assert_eq!(
                bad.parse::<CellId>(),
                Err(GameError::MalformedIdentifier(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_canonical() {
        let id: CellId = "3-17".parse().unwrap();
        assert_eq!(Coordinate::try_from(&id), Ok(Coordinate::new(3, 17)));
    }

    #[test]
    fn test_serde_transparent() {
        let id = coord_to_id(Coordinate::new(4, 5));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"4-5\"");
    }
}
