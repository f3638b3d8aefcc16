#![allow(non_camel_case_types)]
use std::ops::{Index, IndexMut};

#[macro_export]
macro_rules! hashmap {
    () => { std::collections::HashMap::new() };
    ($( $key: expr => $val: expr ),*) => {{
         let mut map = ::std::collections::HashMap::new();
         $( map.insert($key, $val); )*
         map
    }};
}

pub const SWITCHABLE_FILTERS: usize = 3;
pub const SWITCHABLE_FILTER_CONTEXTS: usize = SWITCHABLE_FILTERS + 1;
pub const INTRA_INTER_CONTEXTS: usize = 4;
pub const COMP_INTER_CONTEXTS: usize = 5;
pub const REF_CONTEXTS: usize = 5;
pub const TX_SIZE_CONTEXTS: usize = 2;
pub const SKIP_CONTEXTS: usize = 3;
pub const PREDICTION_PROBS: usize = 3;
pub const COPY_MODE_CONTEXTS: usize = 5;
pub const MAX_SEGMENTS: usize = 8;
pub const MAX_REF_FRAMES: usize = 7;
pub const MAX_COMP_VAR_REFS: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, FromPrimitive)]
#[allow(clippy::upper_case_acronyms)]
#[repr(i8)]
pub enum RefFrame {
    NONE = -1,
    INTRA_FRAME = 0,
    LAST_FRAME = 1,
    LAST2_FRAME = 2,
    LAST3_FRAME = 3,
    LAST4_FRAME = 4,
    GOLDEN_FRAME = 5,
    ALTREF_FRAME = 6,
}

impl RefFrame {
    /// Index into per-frame tables such as the sign bias. `NONE` has no slot.
    #[inline(always)]
    pub fn index(self) -> usize {
        debug_assert!(self != RefFrame::NONE);
        self as i8 as usize
    }

    #[inline(always)]
    pub fn is_inter_ref(self) -> bool {
        self > RefFrame::INTRA_FRAME
    }

    pub fn name(self) -> &'static str {
        match self {
            RefFrame::NONE => "NONE",
            RefFrame::INTRA_FRAME => "INTRA",
            RefFrame::LAST_FRAME => "LAST",
            RefFrame::LAST2_FRAME => "LAST2",
            RefFrame::LAST3_FRAME => "LAST3",
            RefFrame::LAST4_FRAME => "LAST4",
            RefFrame::GOLDEN_FRAME => "GOLDEN",
            RefFrame::ALTREF_FRAME => "ALTREF",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum InterpFilter {
    EIGHTTAP = 0,
    EIGHTTAP_SMOOTH = 1,
    EIGHTTAP_SHARP = 2,
    BILINEAR = 3,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, PartialOrd, Ord, FromPrimitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum TxSize {
    TX_4X4 = 0,
    TX_8X8 = 1,
    TX_16X16 = 2,
    TX_32X32 = 3,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum BlockSize {
    BLOCK_4X4 = 0,
    BLOCK_4X8 = 1,
    BLOCK_8X4 = 2,
    BLOCK_8X8 = 3,
    BLOCK_8X16 = 4,
    BLOCK_16X8 = 5,
    BLOCK_16X16 = 6,
    BLOCK_16X32 = 7,
    BLOCK_32X16 = 8,
    BLOCK_32X32 = 9,
    BLOCK_32X64 = 10,
    BLOCK_64X32 = 11,
    BLOCK_64X64 = 12,
}

pub const BLOCK_SIZES: usize = 13;

pub const MAX_TXSIZE_LOOKUP: [TxSize; BLOCK_SIZES] = [
    TxSize::TX_4X4,
    TxSize::TX_4X4,
    TxSize::TX_4X4,
    TxSize::TX_8X8,
    TxSize::TX_8X8,
    TxSize::TX_8X8,
    TxSize::TX_16X16,
    TxSize::TX_16X16,
    TxSize::TX_16X16,
    TxSize::TX_32X32,
    TxSize::TX_32X32,
    TxSize::TX_32X32,
    TxSize::TX_32X32,
];

pub const NUM_8X8_BLOCKS_WIDE_LOOKUP: [usize; BLOCK_SIZES] = [1, 1, 1, 1, 1, 2, 2, 2, 4, 4, 4, 8, 8];
pub const NUM_8X8_BLOCKS_HIGH_LOOKUP: [usize; BLOCK_SIZES] = [1, 1, 1, 1, 2, 1, 2, 4, 2, 4, 8, 4, 8];

impl BlockSize {
    #[inline(always)]
    pub fn max_tx_size(self) -> TxSize {
        MAX_TXSIZE_LOOKUP[self as usize]
    }

    /// Footprint in 8x8 units as (width, height).
    #[inline(always)]
    pub fn num_8x8_blocks(self) -> (usize, usize) {
        (
            NUM_8X8_BLOCKS_WIDE_LOOKUP[self as usize],
            NUM_8X8_BLOCKS_HIGH_LOOKUP[self as usize],
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum CopyMode {
    NOREF = 0,
    REF0 = 1,
    REF1 = 2,
    REF2 = 3,
}

#[derive(Clone, Debug)]
pub struct Vec2d<T> {
    pub data: Vec<T>,
    pub height: usize,
    pub width: usize,
    pub log2_stride: usize,
}

impl<T: Copy> Vec2d<T> {
    #[inline(always)]
    pub fn new(v: T, height: usize, width: usize) -> Vec2d<T> {
        assert!(width > 0, "width must be greater than 0.");
        let log2_stride = (width * 2 - 1).ilog2() as usize;
        Vec2d {
            data: vec![v; height << log2_stride],
            height,
            width,
            log2_stride,
        }
    }

    #[inline(always)]
    pub fn fill(&mut self, v: T) {
        self.data.fill(v);
    }
}

impl<T> Index<usize> for Vec2d<T> {
    type Output = [T];
    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        let offset = index << self.log2_stride;
        &self.data[offset..offset + self.width]
    }
}

impl<T> IndexMut<usize> for Vec2d<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut [T] {
        let offset = index << self.log2_stride;
        &mut self.data[offset..offset + self.width]
    }
}

#[macro_export]
macro_rules! vec2d {
    ($elem:expr; $h:expr; $w:expr) => {
        Vec2d::new($elem, $h, $w)
    };
}
