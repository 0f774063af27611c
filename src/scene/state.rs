//! Explicit per-frame scene state and the edit events that mutate it.
//!
//! The UI collaborator produces [`SceneEdit`]s; the scene consumes them
//! strictly between frames. [`SceneState::apply`] is a pure state
//! transition that also reports which curve (if any) must be
//! regenerated, so the buffer-churn rules are testable without a GPU.

use crate::geometry::{
    ArchimedeanParams, BernoulliParams, CurveKind, CurveSpec, FermatParams,
};

/// Everything the per-frame update depends on: active curve selection,
/// grid toggles, the shared z offset, and the per-curve parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    /// Which curve is drawn this frame.
    pub active: CurveKind,
    /// XY gridline visibility.
    pub show_grid_xy: bool,
    /// XZ reference grid visibility.
    pub show_grid_xz: bool,
    /// Z coordinate applied to all curve regeneration calls.
    pub z_offset: f32,
    /// Archimedean spiral parameters.
    pub archimedean: ArchimedeanParams,
    /// Fermat spiral parameters.
    pub fermat: FermatParams,
    /// Bernoulli lemniscate parameters.
    pub bernoulli: BernoulliParams,
    /// Spherical-projection flag per curve family
    /// (archimedean, fermat, bernoulli).
    pub spherical: [bool; 3],
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            active: CurveKind::default(),
            show_grid_xy: true,
            show_grid_xz: true,
            z_offset: 0.0,
            archimedean: ArchimedeanParams::default(),
            fermat: FermatParams::default(),
            bernoulli: BernoulliParams::default(),
            spherical: [false; 3],
        }
    }
}

/// A parameter or selection edit produced by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEdit {
    /// Switch the drawn curve family. Never touches buffers.
    SelectCurve(CurveKind),
    /// Show or hide the XY gridlines.
    ToggleGridXy(bool),
    /// Show or hide the XZ reference grid.
    ToggleGridXz(bool),
    /// Change the shared z offset. Takes effect on the next apply.
    SetZOffset(f32),
    /// Apply new Archimedean parameters (regenerates that model).
    ApplyArchimedean(ArchimedeanParams),
    /// Apply new Fermat parameters (regenerates that model).
    ApplyFermat(FermatParams),
    /// Apply new Bernoulli parameters (regenerates that model).
    ApplyBernoulli(BernoulliParams),
    /// Toggle spherical projection for one curve family.
    SetSpherical(CurveKind, bool),
    /// Regenerate the active curve with its current parameters.
    ReapplyActive,
}

impl SceneState {
    /// Apply one edit, returning the curve kind whose vertex buffer must
    /// be regenerated (if any).
    ///
    /// Selection and grid toggles are pure state flips; only explicit
    /// `Apply*`/`ReapplyActive` edits request regeneration.
    pub fn apply(&mut self, edit: &SceneEdit) -> Option<CurveKind> {
        match *edit {
            SceneEdit::SelectCurve(kind) => {
                self.active = kind;
                None
            }
            SceneEdit::ToggleGridXy(on) => {
                self.show_grid_xy = on;
                None
            }
            SceneEdit::ToggleGridXz(on) => {
                self.show_grid_xz = on;
                None
            }
            SceneEdit::SetZOffset(z) => {
                self.z_offset = z;
                None
            }
            SceneEdit::ApplyArchimedean(params) => {
                self.archimedean = params;
                Some(CurveKind::Archimedean)
            }
            SceneEdit::ApplyFermat(params) => {
                self.fermat = params;
                Some(CurveKind::Fermat)
            }
            SceneEdit::ApplyBernoulli(params) => {
                self.bernoulli = params;
                Some(CurveKind::Bernoulli)
            }
            SceneEdit::SetSpherical(kind, on) => {
                if let Some(slot) = Self::spherical_slot(kind) {
                    self.spherical[slot] = on;
                }
                None
            }
            SceneEdit::ReapplyActive => match self.active {
                CurveKind::None => None,
                kind => Some(kind),
            },
        }
    }

    const fn spherical_slot(kind: CurveKind) -> Option<usize> {
        match kind {
            CurveKind::None => None,
            CurveKind::Archimedean => Some(0),
            CurveKind::Fermat => Some(1),
            CurveKind::Bernoulli => Some(2),
        }
    }

    /// Whether spherical projection is enabled for `kind`.
    #[must_use]
    pub const fn spherical_for(&self, kind: CurveKind) -> bool {
        match Self::spherical_slot(kind) {
            Some(slot) => self.spherical[slot],
            None => false,
        }
    }

    /// The generation spec for `kind`, with the shared z offset applied
    /// over the per-curve parameters.
    #[must_use]
    pub fn spec_for(&self, kind: CurveKind) -> Option<CurveSpec> {
        match kind {
            CurveKind::None => None,
            CurveKind::Archimedean => {
                Some(CurveSpec::Archimedean(ArchimedeanParams {
                    z_offset: self.z_offset,
                    ..self.archimedean
                }))
            }
            CurveKind::Fermat => Some(CurveSpec::Fermat(FermatParams {
                z_offset: self.z_offset,
                ..self.fermat
            })),
            CurveKind::Bernoulli => {
                Some(CurveSpec::Bernoulli(BernoulliParams {
                    z_offset: self.z_offset,
                    ..self.bernoulli
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_toggles_never_request_regeneration() {
        let mut state = SceneState::default();
        let before = state.clone();

        assert_eq!(state.apply(&SceneEdit::ToggleGridXy(false)), None);
        assert_eq!(state.apply(&SceneEdit::ToggleGridXz(false)), None);
        assert_eq!(state.apply(&SceneEdit::ToggleGridXy(true)), None);
        assert_eq!(state.apply(&SceneEdit::ToggleGridXz(true)), None);

        // Curve parameters are untouched by visibility flips.
        assert_eq!(state.archimedean, before.archimedean);
        assert_eq!(state.fermat, before.fermat);
        assert_eq!(state.bernoulli, before.bernoulli);
    }

    #[test]
    fn switching_curves_back_and_forth_is_buffer_idempotent() {
        let mut state = SceneState::default();
        // A -> B -> A without parameter edits: no regeneration requests.
        assert_eq!(
            state.apply(&SceneEdit::SelectCurve(CurveKind::Fermat)),
            None
        );
        assert_eq!(
            state.apply(&SceneEdit::SelectCurve(CurveKind::Archimedean)),
            None
        );
        assert_eq!(
            state.apply(&SceneEdit::SelectCurve(CurveKind::Fermat)),
            None
        );
        assert_eq!(state.active, CurveKind::Fermat);
    }

    #[test]
    fn apply_edits_target_exactly_one_curve() {
        let mut state = SceneState::default();
        assert_eq!(
            state.apply(&SceneEdit::ApplyFermat(FermatParams::default())),
            Some(CurveKind::Fermat)
        );
        assert_eq!(
            state.apply(&SceneEdit::ApplyBernoulli(
                BernoulliParams::default()
            )),
            Some(CurveKind::Bernoulli)
        );
    }

    #[test]
    fn reapply_regenerates_the_active_curve_only() {
        let mut state = SceneState::default();
        assert_eq!(
            state.apply(&SceneEdit::ReapplyActive),
            Some(CurveKind::Archimedean)
        );
        let _ = state.apply(&SceneEdit::SelectCurve(CurveKind::None));
        assert_eq!(state.apply(&SceneEdit::ReapplyActive), None);
    }

    #[test]
    fn shared_z_offset_flows_into_specs() {
        let mut state = SceneState::default();
        assert_eq!(state.apply(&SceneEdit::SetZOffset(4.5)), None);

        let Some(CurveSpec::Archimedean(p)) =
            state.spec_for(CurveKind::Archimedean)
        else {
            panic!("expected archimedean spec");
        };
        assert!((p.z_offset - 4.5).abs() < f32::EPSILON);

        let verts = state
            .spec_for(CurveKind::Bernoulli)
            .map(|spec| spec.generate(16))
            .unwrap_or_default();
        assert!(verts.iter().all(|v| (v.position[2] - 4.5).abs() < 1e-6));
    }

    #[test]
    fn spherical_flags_are_per_curve() {
        let mut state = SceneState::default();
        assert_eq!(
            state.apply(&SceneEdit::SetSpherical(CurveKind::Fermat, true)),
            None
        );
        assert!(state.spherical_for(CurveKind::Fermat));
        assert!(!state.spherical_for(CurveKind::Archimedean));
        assert!(!state.spherical_for(CurveKind::Bernoulli));
    }

    #[test]
    fn none_kind_has_no_spec() {
        let state = SceneState::default();
        assert!(state.spec_for(CurveKind::None).is_none());
    }
}
