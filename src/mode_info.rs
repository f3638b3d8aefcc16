use super::common::*;

/// Mode information stored for every 8x8 unit covered by a coded block.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ModeInfo {
    pub sb_type: BlockSize,
    pub ref_frame: [RefFrame; 2],
    pub interp_filter: InterpFilter,
    pub tx_size: TxSize,
    pub skip: bool,
    pub segment_id: u8,
    pub seg_id_predicted: bool,
    pub copy_mode: CopyMode,
}

impl ModeInfo {
    pub fn new(sb_type: BlockSize) -> ModeInfo {
        ModeInfo {
            sb_type,
            ref_frame: [RefFrame::INTRA_FRAME, RefFrame::NONE],
            interp_filter: InterpFilter::EIGHTTAP,
            tx_size: TxSize::TX_4X4,
            skip: false,
            segment_id: 0,
            seg_id_predicted: false,
            copy_mode: CopyMode::NOREF,
        }
    }

    pub fn intra(sb_type: BlockSize) -> ModeInfo {
        ModeInfo::new(sb_type)
    }

    pub fn single(sb_type: BlockSize, ref_frame: RefFrame) -> ModeInfo {
        debug_assert!(ref_frame.is_inter_ref());
        ModeInfo {
            ref_frame: [ref_frame, RefFrame::NONE],
            ..ModeInfo::new(sb_type)
        }
    }

    pub fn compound(sb_type: BlockSize, ref_frame0: RefFrame, ref_frame1: RefFrame) -> ModeInfo {
        debug_assert!(ref_frame0.is_inter_ref() && ref_frame1.is_inter_ref());
        ModeInfo {
            ref_frame: [ref_frame0, ref_frame1],
            ..ModeInfo::new(sb_type)
        }
    }

    #[inline(always)]
    pub fn is_inter_block(&self) -> bool {
        self.ref_frame[0].is_inter_ref()
    }

    #[inline(always)]
    pub fn has_second_ref(&self) -> bool {
        self.ref_frame[1].is_inter_ref()
    }

    /// The reference a block contributes when compared against a compound
    /// decision: its only reference, or the one held in `var_ref_idx`.
    #[inline(always)]
    pub fn variable_ref(&self, var_ref_idx: usize) -> RefFrame {
        if self.has_second_ref() {
            self.ref_frame[var_ref_idx]
        } else {
            self.ref_frame[0]
        }
    }

    /// Whether this block was itself coded as a copy of a neighbour.
    #[inline(always)]
    pub fn is_copy(&self) -> bool {
        self.copy_mode != CopyMode::NOREF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inter_and_compound_predicates() {
        let intra = ModeInfo::intra(BlockSize::BLOCK_8X8);
        assert!(!intra.is_inter_block());
        assert!(!intra.has_second_ref());

        let single = ModeInfo::single(BlockSize::BLOCK_8X8, RefFrame::GOLDEN_FRAME);
        assert!(single.is_inter_block());
        assert!(!single.has_second_ref());
        assert_eq!(single.variable_ref(1), RefFrame::GOLDEN_FRAME);

        let comp = ModeInfo::compound(
            BlockSize::BLOCK_8X8,
            RefFrame::LAST_FRAME,
            RefFrame::ALTREF_FRAME,
        );
        assert!(comp.is_inter_block());
        assert!(comp.has_second_ref());
        assert_eq!(comp.variable_ref(0), RefFrame::LAST_FRAME);
        assert_eq!(comp.variable_ref(1), RefFrame::ALTREF_FRAME);
    }

    #[test]
    fn copy_mode_sentinel() {
        let mut mi = ModeInfo::single(BlockSize::BLOCK_16X16, RefFrame::LAST_FRAME);
        assert!(!mi.is_copy());
        mi.copy_mode = CopyMode::REF1;
        assert!(mi.is_copy());
    }
}
