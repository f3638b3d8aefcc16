#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

use super::common::*;
use super::ref_frame_config::*;
use lazy_static::lazy_static;

/// Small bitset of reference frames, indexed by `RefFrame::index()`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RefFrameSet(u8);

impl RefFrameSet {
    pub const fn of(frames: &[RefFrame]) -> RefFrameSet {
        let mut bits = 0u8;
        let mut i = 0;
        while i < frames.len() {
            bits |= 1 << (frames[i] as i8 as u8);
            i += 1;
        }
        RefFrameSet(bits)
    }

    /// INTRA_FRAME and NONE are never members.
    #[inline(always)]
    pub fn contains(self, ref_frame: RefFrame) -> bool {
        ref_frame.is_inter_ref() && self.0 & (1 << ref_frame.index()) != 0
    }

    #[inline(always)]
    pub fn difference(self, other: RefFrameSet) -> RefFrameSet {
        RefFrameSet(self.0 & !other.0)
    }

    pub fn frames(self) -> Vec<RefFrame> {
        EXTENDED_ORDER
            .iter()
            .copied()
            .filter(|&ref_frame| self.contains(ref_frame))
            .collect()
    }
}

const EXTENDED_ORDER: [RefFrame; 6] = [
    RefFrame::LAST_FRAME,
    RefFrame::LAST2_FRAME,
    RefFrame::LAST3_FRAME,
    RefFrame::LAST4_FRAME,
    RefFrame::GOLDEN_FRAME,
    RefFrame::ALTREF_FRAME,
];

impl std::fmt::Debug for RefFrameSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.frames().iter().map(|ref_frame| ref_frame.name()))
            .finish()
    }
}

/// Binary reference-frame decisions coded with neighbour-derived contexts.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, FromPrimitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum RefSymbol {
    SINGLE_REF_P1 = 0,
    SINGLE_REF_P2 = 1,
    SINGLE_REF_P3 = 2,
    SINGLE_REF_P4 = 3,
    SINGLE_REF_P5 = 4,
    COMP_REF_P = 5,
    COMP_REF_P1 = 6,
    COMP_REF_P2 = 7,
    COMP_REF_P3 = 8,
}

pub const NUM_REF_SYMBOLS: usize = 9;

impl RefSymbol {
    pub fn name(self) -> &'static str {
        match self {
            RefSymbol::SINGLE_REF_P1 => "single_ref_p1",
            RefSymbol::SINGLE_REF_P2 => "single_ref_p2",
            RefSymbol::SINGLE_REF_P3 => "single_ref_p3",
            RefSymbol::SINGLE_REF_P4 => "single_ref_p4",
            RefSymbol::SINGLE_REF_P5 => "single_ref_p5",
            RefSymbol::COMP_REF_P => "comp_ref_p",
            RefSymbol::COMP_REF_P1 => "comp_ref_p1",
            RefSymbol::COMP_REF_P2 => "comp_ref_p2",
            RefSymbol::COMP_REF_P3 => "comp_ref_p3",
        }
    }
}

/// Decision procedure plus its frame sets for one reference symbol.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RefContextRule {
    /// `near` against everything else (first single-reference bit).
    SingleSplit { near: RefFrameSet },
    /// Inside `group`, `hit` against the rest of the group; frames outside
    /// the group carry little information.
    SingleRank {
        group: RefFrameSet,
        hit: RefFrameSet,
    },
    /// `target` against `complement` on the variable compound slot; `anchor`
    /// paired with a complement frame marks disagreement.
    CompSplit {
        target: RefFrameSet,
        complement: RefFrameSet,
        anchor: RefFrame,
    },
    /// comp_var_ref[1] against comp_var_ref[0], both taken from the frame's
    /// reference roles.
    CompVarRef,
    /// `target` against `sibling` on the variable compound slot, with
    /// `other` holding frames already ruled out by earlier bits.
    CompRank {
        target: RefFrame,
        sibling: RefFrameSet,
        other: RefFrameSet,
    },
}

use RefFrame::*;

lazy_static! {
// [reference_set][ref_symbol]
pub static ref ref_context_rules: Vec<Vec<Option<RefContextRule>>> = vec![
    // baseline
    vec![
        // single_ref_p1: LAST vs GOLDEN/ALTREF
        Some(RefContextRule::SingleSplit {
            near: RefFrameSet::of(&[LAST_FRAME]),
        }),
        // single_ref_p2: GOLDEN vs ALTREF
        Some(RefContextRule::SingleRank {
            group: RefFrameSet::of(&[GOLDEN_FRAME, ALTREF_FRAME]),
            hit: RefFrameSet::of(&[GOLDEN_FRAME]),
        }),
        None,
        None,
        None,
        // comp_ref_p
        Some(RefContextRule::CompVarRef),
        None,
        None,
        None,
    ],
    // extended
    vec![
        // single_ref_p1: LAST..LAST4 vs GOLDEN/ALTREF
        Some(RefContextRule::SingleSplit {
            near: RefFrameSet::of(&[LAST_FRAME, LAST2_FRAME, LAST3_FRAME, LAST4_FRAME]),
        }),
        // single_ref_p2: GOLDEN vs ALTREF
        Some(RefContextRule::SingleRank {
            group: RefFrameSet::of(&[GOLDEN_FRAME, ALTREF_FRAME]),
            hit: RefFrameSet::of(&[GOLDEN_FRAME]),
        }),
        // single_ref_p3: LAST/LAST2 vs LAST3/LAST4
        Some(RefContextRule::SingleRank {
            group: RefFrameSet::of(&[LAST_FRAME, LAST2_FRAME, LAST3_FRAME, LAST4_FRAME]),
            hit: RefFrameSet::of(&[LAST_FRAME, LAST2_FRAME]),
        }),
        // single_ref_p4: LAST vs LAST2
        Some(RefContextRule::SingleRank {
            group: RefFrameSet::of(&[LAST_FRAME, LAST2_FRAME]),
            hit: RefFrameSet::of(&[LAST_FRAME]),
        }),
        // single_ref_p5: LAST3 vs LAST4
        Some(RefContextRule::SingleRank {
            group: RefFrameSet::of(&[LAST3_FRAME, LAST4_FRAME]),
            hit: RefFrameSet::of(&[LAST3_FRAME]),
        }),
        // comp_ref_p: GOLDEN/LAST3/LAST4 vs LAST/LAST2
        Some(RefContextRule::CompSplit {
            target: RefFrameSet::of(&[GOLDEN_FRAME, LAST3_FRAME, LAST4_FRAME]),
            complement: RefFrameSet::of(&[LAST_FRAME, LAST2_FRAME]),
            anchor: ALTREF_FRAME,
        }),
        // comp_ref_p1: LAST vs LAST2
        Some(RefContextRule::CompRank {
            target: LAST_FRAME,
            sibling: RefFrameSet::of(&[LAST2_FRAME]),
            other: RefFrameSet::of(&[GOLDEN_FRAME, LAST3_FRAME, LAST4_FRAME]),
        }),
        // comp_ref_p2: GOLDEN vs LAST3/LAST4
        Some(RefContextRule::CompRank {
            target: GOLDEN_FRAME,
            sibling: RefFrameSet::of(&[LAST3_FRAME, LAST4_FRAME]),
            other: RefFrameSet::of(&[LAST_FRAME, LAST2_FRAME]),
        }),
        // comp_ref_p3: LAST3 vs LAST4
        Some(RefContextRule::CompRank {
            target: LAST3_FRAME,
            sibling: RefFrameSet::of(&[LAST4_FRAME]),
            other: RefFrameSet::of(&[LAST_FRAME, LAST2_FRAME, GOLDEN_FRAME]),
        }),
    ],
];
}

#[inline(always)]
pub fn rule_for(reference_set: ReferenceSet, symbol: RefSymbol) -> Option<&'static RefContextRule> {
    ref_context_rules[reference_set as usize][symbol as usize].as_ref()
}

pub fn symbols_for(reference_set: ReferenceSet) -> Vec<RefSymbol> {
    use num::FromPrimitive;
    (0..NUM_REF_SYMBOLS)
        .filter_map(RefSymbol::from_usize)
        .filter(|&symbol| rule_for(reference_set, symbol).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_membership_excludes_non_inter() {
        let set = RefFrameSet::of(&[LAST_FRAME, GOLDEN_FRAME]);
        assert!(set.contains(LAST_FRAME));
        assert!(set.contains(GOLDEN_FRAME));
        assert!(!set.contains(ALTREF_FRAME));
        assert!(!set.contains(INTRA_FRAME));
        assert!(!set.contains(NONE));
        assert_eq!(set.frames(), vec![LAST_FRAME, GOLDEN_FRAME]);
        assert!(set.difference(set).frames().is_empty());
        assert_eq!(
            set.difference(RefFrameSet::of(&[GOLDEN_FRAME])).frames(),
            vec![LAST_FRAME]
        );
    }

    #[test]
    fn symbols_per_reference_set() {
        assert_eq!(
            symbols_for(ReferenceSet::Baseline),
            vec![
                RefSymbol::SINGLE_REF_P1,
                RefSymbol::SINGLE_REF_P2,
                RefSymbol::COMP_REF_P
            ]
        );
        assert_eq!(symbols_for(ReferenceSet::Extended).len(), NUM_REF_SYMBOLS);
    }

    #[test]
    fn extended_sets_only_name_extended_frames() {
        for symbol in symbols_for(ReferenceSet::Extended) {
            let sets = match rule_for(ReferenceSet::Extended, symbol).unwrap() {
                RefContextRule::SingleSplit { near } => vec![*near],
                RefContextRule::SingleRank { group, hit } => {
                    assert!(hit.difference(*group).frames().is_empty());
                    vec![*group, *hit]
                }
                RefContextRule::CompSplit {
                    target, complement, ..
                } => {
                    assert!(target.difference(target.difference(*complement)).frames().is_empty());
                    vec![*target, *complement]
                }
                RefContextRule::CompVarRef => vec![],
                RefContextRule::CompRank { sibling, other, .. } => vec![*sibling, *other],
            };
            for set in sets {
                for ref_frame in set.frames() {
                    assert!(ReferenceSet::Extended.contains(ref_frame));
                }
            }
        }
    }
}
