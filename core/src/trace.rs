use alloc::vec::Vec;
use core::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Per-cell record of one dispatch, same shape as the grid it ran on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathTrace {
    cells: Array2<TraceCell>,
}

impl PathTrace {
    pub fn new(size: GridSize) -> Self {
        Self {
            cells: Array2::default(size.as_coords().to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn cell_at(&self, coords: Coord2) -> TraceCell {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn mark(&mut self, coords: Coord2, cell: TraceCell) {
        self.cells[coords.to_nd_index()] = cell;
    }

    pub fn visited_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_visited()).count() as CellCount
    }

    /// Coordinates of every cell carrying `cell`, in row-major order.
    pub fn cells_marked(&self, cell: TraceCell) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(move |&(_, &c)| c == cell)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }

    pub fn to_rows(&self) -> Vec<Vec<char>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.as_char()).collect())
            .collect()
    }
}

impl fmt::Display for PathTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for row in self.cells.rows() {
            for cell in row {
                f.write_char(cell.as_char())?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn starts_unvisited() {
        let trace = PathTrace::new(GridSize::new(2, 3).unwrap());
        assert_eq!(trace.size(), (2, 3));
        assert_eq!(trace.visited_count(), 0);
        assert_eq!(trace.to_string(), "000\n000\n");
    }

    #[test]
    fn renders_all_markers() {
        let mut trace = PathTrace::new(GridSize::new(2, 2).unwrap());
        trace.mark((0, 0), TraceCell::Visited);
        trace.mark((0, 1), TraceCell::Dig);
        trace.mark((1, 1), TraceCell::Destroyed);

        assert_eq!(trace.to_rows(), vec![vec!['*', '#'], vec!['0', 'X']]);
        assert_eq!(trace.visited_count(), 3);
        assert_eq!(
            trace.cells_marked(TraceCell::Dig).collect::<Vec<_>>(),
            vec![(0, 1)]
        );
    }
}
