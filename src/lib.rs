#![allow(clippy::comparison_chain)]
extern crate num;
#[macro_use]
extern crate num_derive;
#[macro_use]
pub mod common;
pub mod mode_info;
pub mod mode_info_grid;
pub mod pred_context;
pub mod ref_context_tables;
pub mod ref_frame_config;
pub mod segmentation;
pub mod tile;

pub use common::*;
pub use mode_info::ModeInfo;
pub use mode_info_grid::{Availability, ModeInfoGrid, Neighbors};
pub use pred_context::*;
pub use ref_context_tables::{RefContextRule, RefFrameSet, RefSymbol};
pub use ref_frame_config::{RefFrameRoles, ReferenceSet};
pub use segmentation::SegmentMap;
pub use tile::TileInfo;
