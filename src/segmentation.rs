use super::common::*;
use debug_print::*;

/// Segment id of every 8x8 unit of a frame.
pub struct SegmentMap {
    pub mi_rows: usize,
    pub mi_cols: usize,
    ids: Vec2d<u8>,
}

impl SegmentMap {
    pub fn new(mi_rows: usize, mi_cols: usize) -> SegmentMap {
        SegmentMap {
            mi_rows,
            mi_cols,
            ids: vec2d![0; mi_rows; mi_cols],
        }
    }

    pub fn reset(&mut self) {
        self.ids.fill(0);
    }

    #[inline(always)]
    fn clamped_footprint(&self, mi_row: usize, mi_col: usize, bw: usize, bh: usize) -> (usize, usize) {
        assert!(
            mi_row < self.mi_rows && mi_col < self.mi_cols,
            "block origin ({}, {}) outside {}x{} segment map",
            mi_row,
            mi_col,
            self.mi_rows,
            self.mi_cols
        );
        (bw.min(self.mi_cols - mi_col), bh.min(self.mi_rows - mi_row))
    }

    /// Smallest id over the block's units that lie inside the frame.
    pub fn min_segment_id(&self, mi_row: usize, mi_col: usize, bw: usize, bh: usize) -> u8 {
        let (x_mis, y_mis) = self.clamped_footprint(mi_row, mi_col, bw, bh);
        let mut segment_id = u8::MAX;
        for y in 0..y_mis {
            for &id in self.ids[mi_row + y][mi_col..mi_col + x_mis].iter() {
                segment_id = segment_id.min(id);
            }
        }
        assert!((segment_id as usize) < MAX_SEGMENTS);
        segment_id
    }

    pub fn get_segment_id(&self, bsize: BlockSize, mi_row: usize, mi_col: usize) -> u8 {
        let (bw, bh) = bsize.num_8x8_blocks();
        self.min_segment_id(mi_row, mi_col, bw, bh)
    }

    pub fn set_segment_id(&mut self, bsize: BlockSize, mi_row: usize, mi_col: usize, segment_id: u8) {
        assert!((segment_id as usize) < MAX_SEGMENTS);
        let (bw, bh) = bsize.num_8x8_blocks();
        let (x_mis, y_mis) = self.clamped_footprint(mi_row, mi_col, bw, bh);
        debug_eprintln!(
            "segment {} -> ({}, {}) {}x{}",
            segment_id,
            mi_row,
            mi_col,
            x_mis,
            y_mis
        );
        for y in 0..y_mis {
            self.ids[mi_row + y][mi_col..mi_col + x_mis].fill(segment_id);
        }
    }
}
