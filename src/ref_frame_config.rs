use super::common::*;
use debug_print::*;

/// Which family of reference frames the stream signals. Fixed per frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ReferenceSet {
    /// LAST / GOLDEN / ALTREF
    Baseline,
    /// LAST / LAST2 / LAST3 / LAST4 / GOLDEN / ALTREF
    Extended,
}

const BASELINE_REF_FRAMES: [RefFrame; 3] = [
    RefFrame::LAST_FRAME,
    RefFrame::GOLDEN_FRAME,
    RefFrame::ALTREF_FRAME,
];

const EXTENDED_REF_FRAMES: [RefFrame; 6] = [
    RefFrame::LAST_FRAME,
    RefFrame::LAST2_FRAME,
    RefFrame::LAST3_FRAME,
    RefFrame::LAST4_FRAME,
    RefFrame::GOLDEN_FRAME,
    RefFrame::ALTREF_FRAME,
];

impl ReferenceSet {
    pub fn ref_frames(self) -> &'static [RefFrame] {
        match self {
            ReferenceSet::Baseline => &BASELINE_REF_FRAMES,
            ReferenceSet::Extended => &EXTENDED_REF_FRAMES,
        }
    }

    pub fn contains(self, ref_frame: RefFrame) -> bool {
        self.ref_frames().contains(&ref_frame)
    }

    pub fn name(self) -> &'static str {
        match self {
            ReferenceSet::Baseline => "baseline",
            ReferenceSet::Extended => "extended",
        }
    }
}

/// Roles the reference frames play in compound prediction for the current
/// frame. Rebuilt from the frame header before any context query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefFrameRoles {
    pub reference_set: ReferenceSet,
    pub comp_fixed_ref: RefFrame,
    pub comp_var_ref: [RefFrame; MAX_COMP_VAR_REFS],
    pub ref_frame_sign_bias: [bool; MAX_REF_FRAMES],
}

impl RefFrameRoles {
    pub fn new(reference_set: ReferenceSet) -> RefFrameRoles {
        let mut roles = RefFrameRoles {
            reference_set,
            comp_fixed_ref: RefFrame::NONE,
            comp_var_ref: [RefFrame::NONE; MAX_COMP_VAR_REFS],
            ref_frame_sign_bias: [false; MAX_REF_FRAMES],
        };
        roles.setup_compound_reference_mode();
        roles
    }

    #[inline(always)]
    pub fn sign_bias(&self, ref_frame: RefFrame) -> bool {
        self.ref_frame_sign_bias[ref_frame.index()]
    }

    /// Applies sign biases parsed from the frame header and re-derives the
    /// fixed/variable compound references.
    pub fn update_from_sign_bias(&mut self, sign_bias: &[(RefFrame, bool)]) {
        for &(ref_frame, bias) in sign_bias {
            assert!(
                self.reference_set.contains(ref_frame),
                "{} is not part of the {} reference set",
                ref_frame.name(),
                self.reference_set.name()
            );
            self.ref_frame_sign_bias[ref_frame.index()] = bias;
        }
        self.setup_compound_reference_mode();
    }

    pub fn setup_compound_reference_mode(&mut self) {
        self.comp_var_ref = [RefFrame::NONE; MAX_COMP_VAR_REFS];
        match self.reference_set {
            ReferenceSet::Baseline => {
                let last = self.sign_bias(RefFrame::LAST_FRAME);
                if last == self.sign_bias(RefFrame::GOLDEN_FRAME) {
                    self.comp_fixed_ref = RefFrame::ALTREF_FRAME;
                    self.comp_var_ref[0] = RefFrame::LAST_FRAME;
                    self.comp_var_ref[1] = RefFrame::GOLDEN_FRAME;
                } else if last == self.sign_bias(RefFrame::ALTREF_FRAME) {
                    self.comp_fixed_ref = RefFrame::GOLDEN_FRAME;
                    self.comp_var_ref[0] = RefFrame::LAST_FRAME;
                    self.comp_var_ref[1] = RefFrame::ALTREF_FRAME;
                } else {
                    self.comp_fixed_ref = RefFrame::LAST_FRAME;
                    self.comp_var_ref[0] = RefFrame::GOLDEN_FRAME;
                    self.comp_var_ref[1] = RefFrame::ALTREF_FRAME;
                }
            }
            ReferenceSet::Extended => {
                self.comp_fixed_ref = RefFrame::ALTREF_FRAME;
                self.comp_var_ref = [
                    RefFrame::LAST_FRAME,
                    RefFrame::LAST2_FRAME,
                    RefFrame::LAST3_FRAME,
                    RefFrame::LAST4_FRAME,
                    RefFrame::GOLDEN_FRAME,
                ];
            }
        }
        debug_eprintln!(
            "compound refs ({}): fixed={} var={:?} var_slot={}",
            self.reference_set.name(),
            self.comp_fixed_ref.name(),
            self.comp_var_refs(),
            self.variable_slot_index()
        );
    }

    #[inline(always)]
    pub fn num_comp_var_refs(&self) -> usize {
        match self.reference_set {
            ReferenceSet::Baseline => 2,
            ReferenceSet::Extended => 5,
        }
    }

    pub fn comp_var_refs(&self) -> &[RefFrame] {
        &self.comp_var_ref[..self.num_comp_var_refs()]
    }

    #[inline(always)]
    pub fn fixed_slot_index(&self) -> usize {
        self.sign_bias(self.comp_fixed_ref) as usize
    }

    /// Slot of `ref_frame[]` holding the variable reference of a compound block.
    #[inline(always)]
    pub fn variable_slot_index(&self) -> usize {
        (!self.sign_bias(self.comp_fixed_ref)) as usize
    }

    /// Compound prediction needs references on both sides of the current frame.
    pub fn compound_reference_allowed(&self) -> bool {
        let last = self.sign_bias(RefFrame::LAST_FRAME);
        self.reference_set
            .ref_frames()
            .iter()
            .any(|&ref_frame| self.sign_bias(ref_frame) != last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_roles_follow_sign_bias() {
        let mut roles = RefFrameRoles::new(ReferenceSet::Baseline);
        assert_eq!(roles.comp_fixed_ref, RefFrame::ALTREF_FRAME);
        assert_eq!(
            roles.comp_var_refs(),
            &[RefFrame::LAST_FRAME, RefFrame::GOLDEN_FRAME]
        );
        assert!(!roles.compound_reference_allowed());

        roles.update_from_sign_bias(&[(RefFrame::ALTREF_FRAME, true)]);
        assert_eq!(roles.comp_fixed_ref, RefFrame::ALTREF_FRAME);
        assert_eq!(roles.fixed_slot_index(), 1);
        assert_eq!(roles.variable_slot_index(), 0);
        assert!(roles.compound_reference_allowed());

        roles.update_from_sign_bias(&[(RefFrame::GOLDEN_FRAME, true)]);
        assert_eq!(roles.comp_fixed_ref, RefFrame::LAST_FRAME);
        assert_eq!(
            roles.comp_var_refs(),
            &[RefFrame::GOLDEN_FRAME, RefFrame::ALTREF_FRAME]
        );
        assert_eq!(roles.variable_slot_index(), 1);

        roles.update_from_sign_bias(&[(RefFrame::ALTREF_FRAME, false)]);
        assert_eq!(roles.comp_fixed_ref, RefFrame::GOLDEN_FRAME);
        assert_eq!(
            roles.comp_var_refs(),
            &[RefFrame::LAST_FRAME, RefFrame::ALTREF_FRAME]
        );
        assert_eq!(roles.variable_slot_index(), 0);
    }

    #[test]
    fn extended_roles_are_fixed_on_altref() {
        let mut roles = RefFrameRoles::new(ReferenceSet::Extended);
        assert_eq!(roles.comp_fixed_ref, RefFrame::ALTREF_FRAME);
        assert_eq!(roles.comp_var_refs().len(), 5);
        assert_eq!(roles.variable_slot_index(), 1);
        roles.update_from_sign_bias(&[(RefFrame::ALTREF_FRAME, true)]);
        assert_eq!(roles.comp_fixed_ref, RefFrame::ALTREF_FRAME);
        assert_eq!(roles.variable_slot_index(), 0);
        assert!(roles.compound_reference_allowed());
    }

    #[test]
    #[should_panic]
    fn extended_frames_rejected_in_baseline() {
        let mut roles = RefFrameRoles::new(ReferenceSet::Baseline);
        roles.update_from_sign_bias(&[(RefFrame::LAST3_FRAME, true)]);
    }

    #[test]
    fn reference_set_membership() {
        assert!(ReferenceSet::Baseline.contains(RefFrame::GOLDEN_FRAME));
        assert!(!ReferenceSet::Baseline.contains(RefFrame::LAST2_FRAME));
        assert!(ReferenceSet::Extended.contains(RefFrame::LAST4_FRAME));
        assert!(!ReferenceSet::Extended.contains(RefFrame::INTRA_FRAME));
    }
}
