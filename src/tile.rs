/// Tile bounds in 8x8 mode-info units. `*_end` is exclusive.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TileInfo {
    pub mi_row_start: usize,
    pub mi_row_end: usize,
    pub mi_col_start: usize,
    pub mi_col_end: usize,
}

impl TileInfo {
    pub fn new(
        mi_row_start: usize,
        mi_row_end: usize,
        mi_col_start: usize,
        mi_col_end: usize,
    ) -> TileInfo {
        assert!(mi_row_start <= mi_row_end && mi_col_start <= mi_col_end);
        TileInfo {
            mi_row_start,
            mi_row_end,
            mi_col_start,
            mi_col_end,
        }
    }

    pub fn whole_frame(mi_rows: usize, mi_cols: usize) -> TileInfo {
        TileInfo::new(0, mi_rows, 0, mi_cols)
    }

    #[inline(always)]
    pub fn contains(&self, mi_row: usize, mi_col: usize) -> bool {
        mi_row >= self.mi_row_start
            && mi_row < self.mi_row_end
            && mi_col >= self.mi_col_start
            && mi_col < self.mi_col_end
    }

    /// The row above is shared across tile rows; only the frame edge cuts it.
    #[inline(always)]
    pub fn up_available(&self, mi_row: usize) -> bool {
        mi_row > 0
    }

    #[inline(always)]
    pub fn left_available(&self, mi_col: usize) -> bool {
        mi_col > self.mi_col_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_follows_tile_columns() {
        let tile = TileInfo::new(0, 10, 8, 16);
        assert!(!tile.up_available(0));
        assert!(tile.up_available(1));
        assert!(!tile.left_available(8));
        assert!(tile.left_available(9));
        assert!(tile.contains(0, 8));
        assert!(!tile.contains(0, 16));
    }
}
