use super::common::*;
use super::mode_info::*;
use super::tile::*;
use debug_print::*;

/// Per-frame grid of mode info, one entry per 8x8 unit. Cells outside any
/// decoded block stay `None`.
pub struct ModeInfoGrid {
    pub mi_rows: usize,
    pub mi_cols: usize,
    entries: Vec2d<Option<ModeInfo>>,
}

impl ModeInfoGrid {
    pub fn new(mi_rows: usize, mi_cols: usize) -> ModeInfoGrid {
        ModeInfoGrid {
            mi_rows,
            mi_cols,
            entries: vec2d![None; mi_rows; mi_cols],
        }
    }

    pub fn reset(&mut self) {
        debug_eprintln!("reset mode info grid {}x{}", self.mi_cols, self.mi_rows);
        self.entries.fill(None);
    }

    #[inline(always)]
    pub fn get(&self, mi_row: usize, mi_col: usize) -> Option<&ModeInfo> {
        if mi_row < self.mi_rows && mi_col < self.mi_cols {
            self.entries[mi_row][mi_col].as_ref()
        } else {
            None
        }
    }

    pub fn set(&mut self, mi_row: usize, mi_col: usize, mi: ModeInfo) {
        assert!(mi_row < self.mi_rows && mi_col < self.mi_cols);
        self.entries[mi_row][mi_col] = Some(mi);
    }

    /// Stores `mi` over every 8x8 unit of its block, clipped to the frame.
    pub fn fill_block(&mut self, mi_row: usize, mi_col: usize, mi: ModeInfo) {
        assert!(mi_row < self.mi_rows && mi_col < self.mi_cols);
        let (bw, bh) = mi.sb_type.num_8x8_blocks();
        let x_mis = bw.min(self.mi_cols - mi_col);
        let y_mis = bh.min(self.mi_rows - mi_row);
        for y in 0..y_mis {
            self.entries[mi_row + y][mi_col..mi_col + x_mis].fill(Some(mi));
        }
    }

    #[inline(always)]
    pub fn above(&self, tile: &TileInfo, mi_row: usize, mi_col: usize) -> Option<&ModeInfo> {
        if tile.up_available(mi_row) {
            self.get(mi_row - 1, mi_col)
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn left(&self, tile: &TileInfo, mi_row: usize, mi_col: usize) -> Option<&ModeInfo> {
        if tile.left_available(mi_col) {
            self.get(mi_row, mi_col - 1)
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn neighbors(&self, tile: &TileInfo, mi_row: usize, mi_col: usize) -> Neighbors<'_> {
        assert!(tile.contains(mi_row, mi_col));
        Neighbors {
            above: self.above(tile, mi_row, mi_col),
            left: self.left(tile, mi_row, mi_col),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Neighbors<'a> {
    pub above: Option<&'a ModeInfo>,
    pub left: Option<&'a ModeInfo>,
}

/// How many of the two neighbours can be consulted.
#[derive(Clone, Copy, Debug)]
pub enum Availability<'a> {
    // (above, left)
    Both(&'a ModeInfo, &'a ModeInfo),
    One(&'a ModeInfo),
    Unavailable,
}

impl<'a> Neighbors<'a> {
    pub fn new(above: Option<&'a ModeInfo>, left: Option<&'a ModeInfo>) -> Neighbors<'a> {
        Neighbors { above, left }
    }

    #[inline(always)]
    pub fn availability(&self) -> Availability<'a> {
        match (self.above, self.left) {
            (Some(above), Some(left)) => Availability::Both(above, left),
            (Some(edge), None) | (None, Some(edge)) => Availability::One(edge),
            (None, None) => Availability::Unavailable,
        }
    }

    pub fn swapped(&self) -> Neighbors<'a> {
        Neighbors {
            above: self.left,
            left: self.above,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_edges_are_absent() {
        let mut grid = ModeInfoGrid::new(4, 4);
        let tile = TileInfo::whole_frame(4, 4);
        for row in 0..4 {
            for col in 0..4 {
                grid.set(row, col, ModeInfo::intra(BlockSize::BLOCK_8X8));
            }
        }
        let nb = grid.neighbors(&tile, 0, 0);
        assert!(nb.above.is_none() && nb.left.is_none());
        let nb = grid.neighbors(&tile, 0, 2);
        assert!(nb.above.is_none() && nb.left.is_some());
        let nb = grid.neighbors(&tile, 3, 0);
        assert!(nb.above.is_some() && nb.left.is_none());
        assert!(matches!(grid.neighbors(&tile, 2, 2).availability(), Availability::Both(..)));
    }

    #[test]
    fn left_stops_at_tile_column() {
        let mut grid = ModeInfoGrid::new(2, 16);
        grid.fill_block(0, 0, ModeInfo::single(BlockSize::BLOCK_64X64, RefFrame::LAST_FRAME));
        grid.fill_block(0, 8, ModeInfo::single(BlockSize::BLOCK_64X64, RefFrame::GOLDEN_FRAME));
        let tile = TileInfo::new(0, 2, 8, 16);
        assert!(grid.left(&tile, 1, 8).is_none());
        let left = grid.left(&tile, 1, 9).unwrap();
        assert_eq!(left.ref_frame[0], RefFrame::GOLDEN_FRAME);
        let above = grid.above(&tile, 1, 8).unwrap();
        assert_eq!(above.ref_frame[0], RefFrame::GOLDEN_FRAME);
    }

    #[test]
    fn fill_block_is_clipped_and_reset_clears() {
        let mut grid = ModeInfoGrid::new(3, 3);
        grid.fill_block(1, 1, ModeInfo::intra(BlockSize::BLOCK_64X64));
        assert!(grid.get(0, 0).is_none());
        assert!(grid.get(2, 2).is_some());
        assert!(grid.get(1, 1).is_some());
        assert!(grid.get(3, 3).is_none());
        grid.reset();
        assert!(grid.get(2, 2).is_none());
    }

    #[test]
    fn unwritten_neighbor_is_absent_not_default() {
        let grid = ModeInfoGrid::new(2, 2);
        let tile = TileInfo::whole_frame(2, 2);
        let nb = grid.neighbors(&tile, 1, 1);
        assert!(matches!(nb.availability(), Availability::Unavailable));
    }

    #[test]
    fn swapped_exchanges_roles() {
        let intra = ModeInfo::intra(BlockSize::BLOCK_8X8);
        let nb = Neighbors::new(Some(&intra), None);
        let sw = nb.swapped();
        assert!(sw.above.is_none() && sw.left.is_some());
        assert!(matches!(sw.availability(), Availability::One(_)));
    }

    #[test]
    #[should_panic]
    fn neighbors_outside_tile_panics() {
        let grid = ModeInfoGrid::new(2, 16);
        let tile = TileInfo::new(0, 2, 8, 16);
        grid.neighbors(&tile, 1, 3);
    }
}
