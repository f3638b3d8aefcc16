use super::common::*;
use super::mode_info::*;
use super::mode_info_grid::*;
use super::ref_context_tables::*;
use super::ref_frame_config::*;

// Context conventions shared by every function below: neighbours that agree
// with the coded hypothesis map to low indices, missing or conflicting
// information maps to the middle or upper bins.

/// Symbols whose probability context depends on the above/left neighbours.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ContextSymbol {
    SwitchableInterp,
    IntraInter,
    ReferenceMode,
    RefFrame(RefSymbol),
    TxSize,
    CopyMode,
    Skip,
    SegIdPredicted,
}

impl ContextSymbol {
    pub fn num_contexts(self) -> usize {
        match self {
            ContextSymbol::SwitchableInterp => SWITCHABLE_FILTER_CONTEXTS,
            ContextSymbol::IntraInter => INTRA_INTER_CONTEXTS,
            ContextSymbol::ReferenceMode => COMP_INTER_CONTEXTS,
            ContextSymbol::RefFrame(_) => REF_CONTEXTS,
            ContextSymbol::TxSize => TX_SIZE_CONTEXTS,
            ContextSymbol::CopyMode => COPY_MODE_CONTEXTS,
            ContextSymbol::Skip => SKIP_CONTEXTS,
            ContextSymbol::SegIdPredicted => PREDICTION_PROBS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ContextSymbol::SwitchableInterp => "switchable_interp",
            ContextSymbol::IntraInter => "intra_inter",
            ContextSymbol::ReferenceMode => "reference_mode",
            ContextSymbol::RefFrame(symbol) => symbol.name(),
            ContextSymbol::TxSize => "tx_size",
            ContextSymbol::CopyMode => "copy_mode",
            ContextSymbol::Skip => "skip",
            ContextSymbol::SegIdPredicted => "seg_id_predicted",
        }
    }

    /// Every symbol that can be queried under `reference_set`.
    pub fn all(reference_set: ReferenceSet) -> Vec<ContextSymbol> {
        let mut symbols = vec![
            ContextSymbol::SwitchableInterp,
            ContextSymbol::IntraInter,
            ContextSymbol::ReferenceMode,
        ];
        symbols.extend(
            symbols_for(reference_set)
                .into_iter()
                .map(ContextSymbol::RefFrame),
        );
        symbols.extend([
            ContextSymbol::TxSize,
            ContextSymbol::CopyMode,
            ContextSymbol::Skip,
            ContextSymbol::SegIdPredicted,
        ]);
        symbols
    }
}

pub fn derive_ctx(
    symbol: ContextSymbol,
    nb: &Neighbors,
    roles: &RefFrameRoles,
    bsize: BlockSize,
) -> usize {
    match symbol {
        ContextSymbol::SwitchableInterp => derive_ctx_for_switchable_interp(nb),
        ContextSymbol::IntraInter => derive_ctx_for_intra_inter(nb),
        ContextSymbol::ReferenceMode => derive_ctx_for_reference_mode(nb, roles),
        ContextSymbol::RefFrame(ref_symbol) => derive_ctx_for_ref_frame(ref_symbol, nb, roles),
        ContextSymbol::TxSize => derive_ctx_for_tx_size(nb, bsize),
        ContextSymbol::CopyMode => derive_ctx_for_copy_mode(nb),
        ContextSymbol::Skip => derive_ctx_for_skip(nb),
        ContextSymbol::SegIdPredicted => derive_ctx_for_seg_id_predicted(nb),
    }
}

pub fn derive_ctx_for_switchable_interp(nb: &Neighbors) -> usize {
    let filter_type = |mi: Option<&ModeInfo>| match mi {
        Some(mi) if mi.is_inter_block() => mi.interp_filter as usize,
        _ => SWITCHABLE_FILTERS,
    };
    let left_type = filter_type(nb.left);
    let above_type = filter_type(nb.above);

    let ctx = if left_type == above_type {
        left_type
    } else if left_type == SWITCHABLE_FILTERS {
        above_type
    } else if above_type == SWITCHABLE_FILTERS {
        left_type
    } else {
        SWITCHABLE_FILTERS
    };
    assert!(ctx < SWITCHABLE_FILTER_CONTEXTS);
    ctx
}

// 0 - inter/inter, inter/--, --/inter, --/--
// 1 - intra/inter, inter/intra
// 2 - intra/--, --/intra
// 3 - intra/intra
pub fn derive_ctx_for_intra_inter(nb: &Neighbors) -> usize {
    let ctx = match nb.availability() {
        Availability::Both(above, left) => {
            let above_intra = !above.is_inter_block();
            let left_intra = !left.is_inter_block();
            if above_intra && left_intra {
                3
            } else {
                (above_intra || left_intra) as usize
            }
        }
        Availability::One(edge) => 2 * (!edge.is_inter_block()) as usize,
        Availability::Unavailable => 0,
    };
    assert!(ctx < INTRA_INTER_CONTEXTS);
    ctx
}

pub fn derive_ctx_for_reference_mode(nb: &Neighbors, roles: &RefFrameRoles) -> usize {
    let fixed = roles.comp_fixed_ref;
    let ctx = match nb.availability() {
        Availability::Both(above, left) => {
            match (above.has_second_ref(), left.has_second_ref()) {
                // neither edge uses comp pred (0/1)
                (false, false) => {
                    ((above.ref_frame[0] == fixed) ^ (left.ref_frame[0] == fixed)) as usize
                }
                // one of two edges uses comp pred (2/3)
                (false, true) => {
                    2 + (above.ref_frame[0] == fixed || !above.is_inter_block()) as usize
                }
                (true, false) => 2 + (left.ref_frame[0] == fixed || !left.is_inter_block()) as usize,
                // both edges use comp pred (4)
                (true, true) => 4,
            }
        }
        Availability::One(edge) => {
            if edge.has_second_ref() {
                3
            } else {
                (edge.ref_frame[0] == fixed) as usize
            }
        }
        Availability::Unavailable => 1,
    };
    assert!(ctx < COMP_INTER_CONTEXTS);
    ctx
}

/// Context for one binary reference-frame decision, using the table of the
/// active reference set.
pub fn derive_ctx_for_ref_frame(symbol: RefSymbol, nb: &Neighbors, roles: &RefFrameRoles) -> usize {
    let rule = match rule_for(roles.reference_set, symbol) {
        Some(rule) => *rule,
        None => panic!(
            "{} is not coded with the {} reference set",
            symbol.name(),
            roles.reference_set.name()
        ),
    };
    let ctx = match rule {
        RefContextRule::SingleSplit { near } => single_split_ctx(near, nb),
        RefContextRule::SingleRank { group, hit } => single_rank_ctx(group, hit, nb),
        RefContextRule::CompSplit {
            target,
            complement,
            anchor,
        } => comp_split_ctx(target, complement, anchor, roles.variable_slot_index(), nb),
        RefContextRule::CompVarRef => comp_var_ref_ctx(roles, nb),
        RefContextRule::CompRank {
            target,
            sibling,
            other,
        } => comp_rank_ctx(target, sibling, other, roles.variable_slot_index(), nb),
    };
    assert!(ctx < REF_CONTEXTS);
    ctx
}

pub fn derive_ctx_for_single_ref_p1(nb: &Neighbors, roles: &RefFrameRoles) -> usize {
    derive_ctx_for_ref_frame(RefSymbol::SINGLE_REF_P1, nb, roles)
}

pub fn derive_ctx_for_single_ref_p2(nb: &Neighbors, roles: &RefFrameRoles) -> usize {
    derive_ctx_for_ref_frame(RefSymbol::SINGLE_REF_P2, nb, roles)
}

pub fn derive_ctx_for_single_ref_p3(nb: &Neighbors, roles: &RefFrameRoles) -> usize {
    derive_ctx_for_ref_frame(RefSymbol::SINGLE_REF_P3, nb, roles)
}

pub fn derive_ctx_for_single_ref_p4(nb: &Neighbors, roles: &RefFrameRoles) -> usize {
    derive_ctx_for_ref_frame(RefSymbol::SINGLE_REF_P4, nb, roles)
}

pub fn derive_ctx_for_single_ref_p5(nb: &Neighbors, roles: &RefFrameRoles) -> usize {
    derive_ctx_for_ref_frame(RefSymbol::SINGLE_REF_P5, nb, roles)
}

pub fn derive_ctx_for_comp_ref_p(nb: &Neighbors, roles: &RefFrameRoles) -> usize {
    derive_ctx_for_ref_frame(RefSymbol::COMP_REF_P, nb, roles)
}

pub fn derive_ctx_for_comp_ref_p1(nb: &Neighbors, roles: &RefFrameRoles) -> usize {
    derive_ctx_for_ref_frame(RefSymbol::COMP_REF_P1, nb, roles)
}

pub fn derive_ctx_for_comp_ref_p2(nb: &Neighbors, roles: &RefFrameRoles) -> usize {
    derive_ctx_for_ref_frame(RefSymbol::COMP_REF_P2, nb, roles)
}

pub fn derive_ctx_for_comp_ref_p3(nb: &Neighbors, roles: &RefFrameRoles) -> usize {
    derive_ctx_for_ref_frame(RefSymbol::COMP_REF_P3, nb, roles)
}

/// Single reference of one neighbour and both references of the other, for
/// the single/compound mix.
#[inline(always)]
fn split_single_and_comp(above: &ModeInfo, left: &ModeInfo) -> (RefFrame, [RefFrame; 2]) {
    if above.has_second_ref() {
        (left.ref_frame[0], above.ref_frame)
    } else {
        (above.ref_frame[0], left.ref_frame)
    }
}

fn single_split_ctx(near: RefFrameSet, nb: &Neighbors) -> usize {
    let n = |ref_frame: RefFrame| near.contains(ref_frame);
    let inter_edge_ctx = |edge: &ModeInfo| {
        if edge.has_second_ref() {
            1 + (n(edge.ref_frame[0]) || n(edge.ref_frame[1])) as usize
        } else {
            4 * n(edge.ref_frame[0]) as usize
        }
    };

    match nb.availability() {
        Availability::Both(above, left) => {
            let above_intra = !above.is_inter_block();
            let left_intra = !left.is_inter_block();
            if above_intra && left_intra {
                2
            } else if above_intra || left_intra {
                inter_edge_ctx(if above_intra { left } else { above })
            } else {
                let [above0, above1] = above.ref_frame;
                let [left0, left1] = left.ref_frame;
                match (above.has_second_ref(), left.has_second_ref()) {
                    (true, true) => 1 + (n(above0) || n(above1) || n(left0) || n(left1)) as usize,
                    (false, false) => 2 * n(above0) as usize + 2 * n(left0) as usize,
                    _ => {
                        let (rfs, [crf1, crf2]) = split_single_and_comp(above, left);
                        let crf_near = (n(crf1) || n(crf2)) as usize;
                        if n(rfs) {
                            3 + crf_near
                        } else {
                            crf_near
                        }
                    }
                }
            }
        }
        Availability::One(edge) => {
            if edge.is_inter_block() {
                inter_edge_ctx(edge)
            } else {
                2
            }
        }
        Availability::Unavailable => 2,
    }
}

fn single_rank_ctx(group: RefFrameSet, hit: RefFrameSet, nb: &Neighbors) -> usize {
    let sibling = group.difference(hit);
    let g = |ref_frame: RefFrame| group.contains(ref_frame);
    let h = |ref_frame: RefFrame| hit.contains(ref_frame);

    match nb.availability() {
        Availability::Both(above, left) => {
            let above_intra = !above.is_inter_block();
            let left_intra = !left.is_inter_block();
            if above_intra && left_intra {
                2
            } else if above_intra || left_intra {
                let edge = if above_intra { left } else { above };
                let [edge0, edge1] = edge.ref_frame;
                if edge.has_second_ref() {
                    1 + 2 * (h(edge0) || h(edge1)) as usize
                } else if !g(edge0) {
                    3
                } else {
                    4 * h(edge0) as usize
                }
            } else {
                let [above0, above1] = above.ref_frame;
                let [left0, left1] = left.ref_frame;
                match (above.has_second_ref(), left.has_second_ref()) {
                    (true, true) => {
                        if above0 == left0 && above1 == left1 {
                            3 * (h(above0) || h(above1) || h(left0) || h(left1)) as usize
                        } else {
                            2
                        }
                    }
                    (false, false) => {
                        if !g(above0) && !g(left0) {
                            2 + (above0 == left0) as usize
                        } else if !g(above0) || !g(left0) {
                            let edge0 = if !g(above0) { left0 } else { above0 };
                            4 * h(edge0) as usize
                        } else {
                            2 * h(above0) as usize + 2 * h(left0) as usize
                        }
                    }
                    _ => {
                        let (rfs, [crf1, crf2]) = split_single_and_comp(above, left);
                        let crf_hit = (h(crf1) || h(crf2)) as usize;
                        if h(rfs) {
                            3 + crf_hit
                        } else if sibling.contains(rfs) {
                            crf_hit
                        } else {
                            1 + 2 * crf_hit
                        }
                    }
                }
            }
        }
        Availability::One(edge) => {
            let [edge0, edge1] = edge.ref_frame;
            if !edge.is_inter_block() || (!g(edge0) && !edge.has_second_ref()) {
                2
            } else if !edge.has_second_ref() {
                4 * h(edge0) as usize
            } else {
                3 * (h(edge0) || h(edge1)) as usize
            }
        }
        Availability::Unavailable => 2,
    }
}

fn comp_split_ctx(
    target: RefFrameSet,
    complement: RefFrameSet,
    anchor: RefFrame,
    var_ref_idx: usize,
    nb: &Neighbors,
) -> usize {
    let t = |ref_frame: RefFrame| target.contains(ref_frame);
    let c = |ref_frame: RefFrame| complement.contains(ref_frame);

    match nb.availability() {
        Availability::Both(above, left) => {
            let above_intra = !above.is_inter_block();
            let left_intra = !left.is_inter_block();
            if above_intra && left_intra {
                2
            } else if above_intra || left_intra {
                let edge = if above_intra { left } else { above };
                1 + 2 * (!t(edge.variable_ref(var_ref_idx))) as usize
            } else {
                let a_sg = !above.has_second_ref();
                let l_sg = !left.has_second_ref();
                let vrfa = above.variable_ref(var_ref_idx);
                let vrfl = left.variable_ref(var_ref_idx);

                if vrfa == vrfl && t(vrfa) {
                    0
                } else if a_sg && l_sg {
                    if (vrfa == anchor && c(vrfl)) || (vrfl == anchor && c(vrfa)) {
                        4
                    } else if vrfa == vrfl || (c(vrfa) && c(vrfl)) {
                        3
                    } else {
                        1
                    }
                } else if a_sg || l_sg {
                    let vrfc = if l_sg { vrfa } else { vrfl };
                    let rfs = if a_sg { vrfa } else { vrfl };
                    if t(vrfc) && !t(rfs) {
                        1
                    } else if t(rfs) && !t(vrfc) {
                        2
                    } else {
                        4
                    }
                } else if c(vrfa) && c(vrfl) {
                    4
                } else {
                    2
                }
            }
        }
        Availability::One(edge) => {
            if !edge.is_inter_block() {
                2
            } else if edge.has_second_ref() {
                4 * (!t(edge.ref_frame[var_ref_idx])) as usize
            } else {
                3 * (!t(edge.ref_frame[0])) as usize
            }
        }
        Availability::Unavailable => 2,
    }
}

// Three-reference streams: comp_var_ref[1] is coded against comp_var_ref[0].
// Not folded into comp_split_ctx: the comp/comp leaf compares frames for
// equality instead of set membership.
fn comp_var_ref_ctx(roles: &RefFrameRoles, nb: &Neighbors) -> usize {
    let var_ref_idx = roles.variable_slot_index();
    let fixed = roles.comp_fixed_ref;
    let var0 = roles.comp_var_ref[0];
    let var1 = roles.comp_var_ref[1];

    match nb.availability() {
        Availability::Both(above, left) => {
            let above_intra = !above.is_inter_block();
            let left_intra = !left.is_inter_block();
            if above_intra && left_intra {
                2
            } else if above_intra || left_intra {
                let edge = if above_intra { left } else { above };
                1 + 2 * (edge.variable_ref(var_ref_idx) != var1) as usize
            } else {
                let a_sg = !above.has_second_ref();
                let l_sg = !left.has_second_ref();
                let vrfa = above.variable_ref(var_ref_idx);
                let vrfl = left.variable_ref(var_ref_idx);

                if vrfa == vrfl && vrfa == var1 {
                    0
                } else if a_sg && l_sg {
                    if (vrfa == fixed && vrfl == var0) || (vrfl == fixed && vrfa == var0) {
                        4
                    } else if vrfa == vrfl {
                        3
                    } else {
                        1
                    }
                } else if a_sg || l_sg {
                    let vrfc = if l_sg { vrfa } else { vrfl };
                    let rfs = if a_sg { vrfa } else { vrfl };
                    if vrfc == var1 && rfs != var1 {
                        1
                    } else if rfs == var1 && vrfc != var1 {
                        2
                    } else {
                        4
                    }
                } else if vrfa == vrfl {
                    4
                } else {
                    2
                }
            }
        }
        Availability::One(edge) => {
            if !edge.is_inter_block() {
                2
            } else if edge.has_second_ref() {
                4 * (edge.ref_frame[var_ref_idx] != var1) as usize
            } else {
                3 * (edge.ref_frame[0] != var1) as usize
            }
        }
        Availability::Unavailable => 2,
    }
}

fn comp_rank_ctx(
    target: RefFrame,
    sibling: RefFrameSet,
    other: RefFrameSet,
    var_ref_idx: usize,
    nb: &Neighbors,
) -> usize {
    let o = |ref_frame: RefFrame| other.contains(ref_frame);

    match nb.availability() {
        Availability::Both(above, left) => {
            let above_intra = !above.is_inter_block();
            let left_intra = !left.is_inter_block();
            if above_intra && left_intra {
                2
            } else if above_intra || left_intra {
                let edge = if above_intra { left } else { above };
                1 + 2 * (edge.variable_ref(var_ref_idx) != target) as usize
            } else {
                let a_sg = !above.has_second_ref();
                let l_sg = !left.has_second_ref();
                let vrfa = above.variable_ref(var_ref_idx);
                let vrfl = left.variable_ref(var_ref_idx);

                if vrfa == vrfl && vrfa == target {
                    0
                } else if a_sg && l_sg {
                    if vrfa == target || vrfl == target {
                        1
                    } else if o(vrfa) || o(vrfl) {
                        2 + (vrfa != vrfl) as usize
                    } else if vrfa == vrfl {
                        3
                    } else {
                        4
                    }
                } else if a_sg || l_sg {
                    let vrfc = if l_sg { vrfa } else { vrfl };
                    let rfs = if a_sg { vrfa } else { vrfl };
                    if vrfc == target && rfs != target {
                        1
                    } else if rfs == target && vrfc != target {
                        2
                    } else {
                        3 + (sibling.contains(vrfc) || o(rfs)) as usize
                    }
                } else if vrfa == target || vrfl == target {
                    2
                } else {
                    3 + (o(vrfa) || o(vrfl)) as usize
                }
            }
        }
        Availability::One(edge) => {
            if !edge.is_inter_block() {
                2
            } else if edge.has_second_ref() {
                4 * (edge.ref_frame[var_ref_idx] != target) as usize
            } else if edge.ref_frame[0] == target {
                0
            } else {
                2 + o(edge.ref_frame[0]) as usize
            }
        }
        Availability::Unavailable => 2,
    }
}

/// Skipped or missing neighbours count as the largest transform the current
/// block allows; a missing side mirrors the other one.
pub fn derive_ctx_for_tx_size(nb: &Neighbors, bsize: BlockSize) -> usize {
    let max_tx_size = bsize.max_tx_size() as usize;
    let tx_ctx = |mi: Option<&ModeInfo>| match mi {
        Some(mi) if !mi.skip => mi.tx_size as usize,
        _ => max_tx_size,
    };
    let mut above_ctx = tx_ctx(nb.above);
    let mut left_ctx = tx_ctx(nb.left);
    if nb.left.is_none() {
        left_ctx = above_ctx;
    }
    if nb.above.is_none() {
        above_ctx = left_ctx;
    }
    let ctx = (above_ctx + left_ctx > max_tx_size) as usize;
    assert!(ctx < TX_SIZE_CONTEXTS);
    ctx
}

pub fn derive_ctx_for_copy_mode(nb: &Neighbors) -> usize {
    let ctx = match nb.availability() {
        Availability::Both(above, left) => {
            let above_intra = !above.is_inter_block();
            let left_intra = !left.is_inter_block();
            if above_intra && left_intra {
                4
            } else if above_intra || left_intra {
                3
            } else {
                match (above.is_copy(), left.is_copy()) {
                    (true, true) => 0,
                    (true, false) | (false, true) => 1,
                    (false, false) => 2,
                }
            }
        }
        Availability::One(edge) => {
            if !edge.is_inter_block() {
                3
            } else if edge.is_copy() {
                0
            } else {
                1
            }
        }
        Availability::Unavailable => 0,
    };
    assert!(ctx < COPY_MODE_CONTEXTS);
    ctx
}

pub fn derive_ctx_for_skip(nb: &Neighbors) -> usize {
    let above_skip = nb.above.map_or(false, |mi| mi.skip);
    let left_skip = nb.left.map_or(false, |mi| mi.skip);
    let ctx = above_skip as usize + left_skip as usize;
    assert!(ctx < SKIP_CONTEXTS);
    ctx
}

pub fn derive_ctx_for_seg_id_predicted(nb: &Neighbors) -> usize {
    let above_sip = nb.above.map_or(false, |mi| mi.seg_id_predicted);
    let left_sip = nb.left.map_or(false, |mi| mi.seg_id_predicted);
    let ctx = above_sip as usize + left_sip as usize;
    assert!(ctx < PREDICTION_PROBS);
    ctx
}
