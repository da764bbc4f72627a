//! A dense rectangular tile map.
//!
//! [`TileGrid`] is the simplest useful [`Tiles`] adapter: one value per cell
//! of a [`Range`], with everything outside the range off-map.

use tilepath_core::{Coord, Range};

use crate::traits::Tiles;

/// A cell value together with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridTile<C> {
    pub pos: Coord,
    pub cell: C,
}

/// Row-major grid of `C` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid<C> {
    range: Range,
    cells: Vec<C>,
}

impl<C: Clone> TileGrid<C> {
    /// A `width` × `height` grid with its origin at (0, 0), filled with `fill`.
    pub fn new(width: i32, height: i32, fill: C) -> Self {
        let range = Range::new(0, 0, width, height);
        Self {
            range,
            cells: vec![fill; range.len()],
        }
    }

    /// The covered rectangle.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Option<&C> {
        self.range.index(c).map(|i| &self.cells[i])
    }

    /// Overwrite the cell at `c`. Returns `false` if `c` is off-map.
    pub fn set(&mut self, c: Coord, value: C) -> bool {
        match self.range.index(c) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// The tile at `(x, y)`.
    pub fn at(&self, x: i32, y: i32) -> Option<GridTile<C>> {
        self.tile(Coord::new(x, y))
    }

    /// First coordinate, in row-major order, whose cell satisfies `pred`.
    pub fn find(&self, pred: impl Fn(&C) -> bool) -> Option<Coord> {
        self.range
            .iter()
            .zip(self.cells.iter())
            .find(|(_, cell)| pred(cell))
            .map(|(c, _)| c)
    }
}

impl TileGrid<char> {
    /// Build a grid from lines of text, one cell per character.
    ///
    /// Shorter lines are padded with spaces; leading and trailing blank
    /// lines are ignored.
    pub fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text
            .lines()
            .skip_while(|l| l.trim().is_empty())
            .collect();
        let lines = match lines.iter().rposition(|l| !l.trim().is_empty()) {
            Some(last) => &lines[..=last],
            None => &[][..],
        };
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut grid = TileGrid::new(width as i32, lines.len() as i32, ' ');
        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                grid.set(Coord::new(x as i32, y as i32), ch);
            }
        }
        grid
    }
}

impl<C: Clone> Tiles for TileGrid<C> {
    type Tile = GridTile<C>;

    #[inline]
    fn coord(&self, tile: &GridTile<C>) -> Coord {
        tile.pos
    }

    #[inline]
    fn tile(&self, coord: Coord) -> Option<GridTile<C>> {
        self.get(coord).map(|cell| GridTile {
            pos: coord,
            cell: cell.clone(),
        })
    }
}
