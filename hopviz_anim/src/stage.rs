// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure derivations for the page around the cloud: context, encoder, progress, chart.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use crate::clock::AnimationState;
use crate::phase::AnimationPhase;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Most document badges the context ever shows.
///
/// The last hop's document is found but not appended, which is how the page
/// illustrates the stopping condition.
pub const MAX_CONTEXT_DOCS: u32 = 3;

/// Number of dense-vector cells.
pub const VECTOR_CELLS: usize = 12;

/// Document badges currently shown in the context, capped at [`MAX_CONTEXT_DOCS`].
pub fn visible_documents(state: &AnimationState) -> u32 {
    let appending = state.phase == AnimationPhase::ContextUpdating
        && state.current_hop < MAX_CONTEXT_DOCS;
    (state.current_hop + u32::from(appending)).min(MAX_CONTEXT_DOCS)
}

/// Hop depths revealed on the benchmark chart.
pub fn visible_hops(state: &AnimationState) -> u32 {
    let revealing = state.phase == AnimationPhase::ContextUpdating || state.is_complete;
    state.current_hop + u32::from(revealing)
}

/// Which parts of the pipeline diagram are currently active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageFlags {
    /// Context tokens flow into the encoder.
    pub input_to_model: bool,
    /// The encoder output and the arrow into the cloud are lit.
    pub vector_output: bool,
    /// A document is flying back to the context.
    pub document_return: bool,
    /// The context is growing by one document.
    pub context_update: bool,
    /// The landing marker in the context box is shown.
    pub landing_zone: bool,
    /// The "D{n} found!" label is shown.
    pub found_label: bool,
}

impl StageFlags {
    /// Derives the flags for `state`.
    pub fn for_state(state: &AnimationState) -> Self {
        let phase = state.phase;
        let returns = state.current_hop < MAX_CONTEXT_DOCS;
        let document_return = phase == AnimationPhase::DocumentReturning && returns;
        Self {
            input_to_model: phase == AnimationPhase::Processing,
            vector_output: matches!(
                phase,
                AnimationPhase::VectorTraveling | AnimationPhase::CloudSearching
            ),
            document_return,
            context_update: phase == AnimationPhase::ContextUpdating && returns,
            landing_zone: document_return && state.progress > 0.8,
            found_label: phase == AnimationPhase::CloudSearching && state.progress > 0.6,
        }
    }
}

/// Heading of the context box.
pub fn context_label(state: &AnimationState) -> &'static str {
    if state.current_hop == 0 && !StageFlags::for_state(state).context_update {
        "Input"
    } else {
        "Expanding Context"
    }
}

/// Label shown next to the match marker once the document is found.
pub fn found_label(state: &AnimationState) -> Option<String> {
    StageFlags::for_state(state)
        .found_label
        .then(|| format!("D{} found!", state.current_hop + 1))
}

/// Status line under the encoder block.
pub fn status_text(phase: AnimationPhase) -> &'static str {
    match phase {
        AnimationPhase::Idle => "Ready",
        AnimationPhase::Processing => "Creating dense vector...",
        AnimationPhase::VectorTraveling => "Searching index...",
        AnimationPhase::CloudSearching => "Finding nearest neighbor...",
        AnimationPhase::DocumentReturning => "Retrieving document...",
        AnimationPhase::ContextUpdating => "Updating context...",
    }
}

/// Fill fraction of the encoder progress bar.
pub fn encoder_progress(state: &AnimationState) -> f64 {
    match state.phase {
        AnimationPhase::Processing => state.progress,
        AnimationPhase::Idle => 0.0,
        _ => 1.0,
    }
}

/// Whether the encoder block glows.
pub fn encoder_active(state: &AnimationState) -> bool {
    state.phase == AnimationPhase::Processing
}

/// The encoder output strip for the current hop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TensorStrip {
    /// One value per bar, `0..=1`.
    pub values: &'static [f64; 12],
    /// Strip opacity.
    pub opacity: f64,
}

/// Encoder output strip, shown while processing (fading in) and during vector output.
pub fn tensor_strip(state: &AnimationState) -> Option<TensorStrip> {
    let values = &crate::data::TENSOR_VALUES[state.current_hop as usize % 4];
    match state.phase {
        AnimationPhase::Processing => Some(TensorStrip {
            values,
            opacity: state.progress * 0.7,
        }),
        AnimationPhase::VectorTraveling | AnimationPhase::CloudSearching => Some(TensorStrip {
            values,
            opacity: 1.0,
        }),
        _ => None,
    }
}

/// Bar height for a tensor value.
pub fn tensor_bar_height(value: f64) -> f64 {
    12.0 + value * 16.0
}

/// HSL components (`hue` in degrees, `saturation`/`lightness` in percent) for a tensor value.
pub fn tensor_bar_hsl(value: f64) -> [f64; 3] {
    [220.0 + value * 60.0, 75.0, 45.0 + value * 20.0]
}

/// Dense-vector cell values for `hop`.
///
/// The values are a fixed function of the hop, so every replay shows the same vector.
pub fn vector_values(hop: u32) -> [f64; VECTOR_CELLS] {
    let seed = f64::from(hop) * 17.0 + 3.0;
    let mut out = [0.0; VECTOR_CELLS];
    for (i, v) in out.iter_mut().enumerate() {
        let x = (seed + i as f64 * 0.7).sin() * 0.5 + 0.5;
        *v = x.clamp(0.0, 1.0);
    }
    out
}

/// Number of dense-vector cells filled in.
pub fn visible_cells(state: &AnimationState) -> usize {
    if state.phase != AnimationPhase::Processing {
        return VECTOR_CELLS;
    }
    let filled = (state.progress * VECTOR_CELLS as f64).floor();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "progress is clamped to [0, 1], so this is at most VECTOR_CELLS"
    )]
    {
        (filled.max(0.0) as usize).min(VECTOR_CELLS)
    }
}

/// Whether the dense vector is emphasized.
pub fn vector_emphasized(state: &AnimationState) -> bool {
    matches!(
        state.phase,
        AnimationPhase::Processing
            | AnimationPhase::VectorTraveling
            | AnimationPhase::CloudSearching
    )
}

/// Status of one dot in the hop progress indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HopStatus {
    /// Not reached yet.
    Pending,
    /// The hop currently playing.
    Active,
    /// Finished.
    Done,
}

/// Status of indicator dot `index` (zero-based).
pub fn hop_status(state: &AnimationState, index: u32) -> HopStatus {
    if state.current_hop < index {
        HopStatus::Pending
    } else if state.current_hop == index && !state.is_complete {
        HopStatus::Active
    } else {
        HopStatus::Done
    }
}

/// Text beside the hop indicator.
pub fn progress_label(state: &AnimationState, total_hops: u32) -> String {
    if state.is_complete {
        String::from("Complete!")
    } else {
        format!("Hop {}/{}", state.current_hop + 1, total_hops)
    }
}

/// Stroke opacity of the main benchmark series for `visible_hops` revealed depths.
pub fn main_series_opacity(visible_hops: u32) -> f64 {
    if visible_hops == 0 {
        return 0.15;
    }
    (0.15 + f64::from(visible_hops) * 0.22).min(1.0)
}

/// Values of a series with unrevealed depths masked out.
pub fn revealed_values(values: &[f64; 4], visible_hops: u32) -> [Option<f64>; 4] {
    let mut out = [None; 4];
    for (slot, &v) in out.iter_mut().zip(values).take(visible_hops as usize) {
        *slot = Some(v);
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn at(hop: u32, phase: AnimationPhase, p: f64) -> AnimationState {
        AnimationState::at(hop, phase, p)
    }

    #[test]
    fn documents_grow_during_context_updating() {
        assert_eq!(visible_documents(&at(0, AnimationPhase::DocumentReturning, 0.9)), 0);
        assert_eq!(visible_documents(&at(0, AnimationPhase::ContextUpdating, 0.0)), 1);
        assert_eq!(visible_documents(&at(1, AnimationPhase::Idle, 0.0)), 1);
        assert_eq!(visible_documents(&at(2, AnimationPhase::ContextUpdating, 0.5)), 3);
    }

    #[test]
    fn documents_never_exceed_three() {
        for hop in 0..10 {
            for phase in AnimationPhase::ORDER {
                let s = at(hop, phase, 1.0);
                assert!(visible_documents(&s) <= MAX_CONTEXT_DOCS, "{s:?}");
            }
        }
        let mut done = at(3, AnimationPhase::ContextUpdating, 1.0);
        done.is_complete = true;
        assert_eq!(visible_documents(&done), 3);
    }

    #[test]
    fn chart_reveals_hop_on_update_and_completion() {
        assert_eq!(visible_hops(&at(0, AnimationPhase::CloudSearching, 0.5)), 0);
        assert_eq!(visible_hops(&at(0, AnimationPhase::ContextUpdating, 0.0)), 1);
        assert_eq!(visible_hops(&at(2, AnimationPhase::Idle, 0.0)), 2);
        let mut done = at(3, AnimationPhase::ContextUpdating, 1.0);
        done.is_complete = true;
        assert_eq!(visible_hops(&done), 4);
    }

    #[test]
    fn stage_flags_follow_phase() {
        let f = StageFlags::for_state(&at(0, AnimationPhase::Processing, 0.2));
        assert!(f.input_to_model && !f.vector_output);

        let f = StageFlags::for_state(&at(1, AnimationPhase::DocumentReturning, 0.9));
        assert!(f.document_return && f.landing_zone);

        let f = StageFlags::for_state(&at(3, AnimationPhase::DocumentReturning, 0.9));
        assert!(!f.document_return && !f.landing_zone);

        let f = StageFlags::for_state(&at(3, AnimationPhase::ContextUpdating, 0.5));
        assert!(!f.context_update);

        let f = StageFlags::for_state(&at(0, AnimationPhase::CloudSearching, 0.61));
        assert!(f.vector_output && f.found_label);
    }

    #[test]
    fn context_label_switches_on_first_update() {
        assert_eq!(context_label(&at(0, AnimationPhase::Processing, 0.5)), "Input");
        assert_eq!(
            context_label(&at(0, AnimationPhase::ContextUpdating, 0.1)),
            "Expanding Context"
        );
        assert_eq!(context_label(&at(2, AnimationPhase::Idle, 0.0)), "Expanding Context");
    }

    #[test]
    fn found_label_names_the_hop_document() {
        assert_eq!(
            found_label(&at(1, AnimationPhase::CloudSearching, 0.7)).as_deref(),
            Some("D2 found!")
        );
        assert_eq!(found_label(&at(1, AnimationPhase::CloudSearching, 0.5)), None);
    }

    #[test]
    fn encoder_bar_fills_only_while_processing() {
        assert_eq!(encoder_progress(&at(0, AnimationPhase::Idle, 0.7)), 0.0);
        assert_eq!(encoder_progress(&at(0, AnimationPhase::Processing, 0.4)), 0.4);
        assert_eq!(encoder_progress(&at(0, AnimationPhase::CloudSearching, 0.1)), 1.0);
        assert!(encoder_active(&at(0, AnimationPhase::Processing, 0.0)));
        assert_eq!(status_text(AnimationPhase::Idle), "Ready");
    }

    #[test]
    fn tensor_strip_fades_in_then_holds() {
        let s = tensor_strip(&at(5, AnimationPhase::Processing, 0.5)).unwrap();
        assert_eq!(s.values, &crate::data::TENSOR_VALUES[1]);
        assert!((s.opacity - 0.35).abs() < 1e-12);
        let s = tensor_strip(&at(0, AnimationPhase::CloudSearching, 0.0)).unwrap();
        assert_eq!(s.opacity, 1.0);
        assert!(tensor_strip(&at(0, AnimationPhase::DocumentReturning, 0.0)).is_none());
        assert_eq!(tensor_bar_height(0.5), 20.0);
        assert_eq!(tensor_bar_hsl(1.0), [280.0, 75.0, 65.0]);
    }

    #[test]
    fn vector_cells_fill_during_processing() {
        assert_eq!(visible_cells(&at(0, AnimationPhase::Processing, 0.0)), 0);
        assert_eq!(visible_cells(&at(0, AnimationPhase::Processing, 0.5)), 6);
        assert_eq!(visible_cells(&at(0, AnimationPhase::Processing, 1.0)), 12);
        assert_eq!(visible_cells(&at(0, AnimationPhase::Idle, 0.0)), 12);
    }

    #[test]
    fn vector_values_are_stable_and_bounded() {
        assert_eq!(vector_values(2), vector_values(2));
        assert_ne!(vector_values(0), vector_values(1));
        assert!(vector_values(3).iter().all(|v| (0.0..=1.0).contains(v)));
        let first = vector_values(0)[0];
        assert!((first - (3.0_f64.sin() * 0.5 + 0.5)).abs() < 1e-12);
    }

    #[test]
    fn hop_indicator_tracks_progress() {
        let s = at(1, AnimationPhase::Processing, 0.0);
        assert_eq!(hop_status(&s, 0), HopStatus::Done);
        assert_eq!(hop_status(&s, 1), HopStatus::Active);
        assert_eq!(hop_status(&s, 2), HopStatus::Pending);
        assert_eq!(progress_label(&s, 4), "Hop 2/4");

        let mut done = at(3, AnimationPhase::ContextUpdating, 1.0);
        done.is_complete = true;
        assert_eq!(hop_status(&done, 3), HopStatus::Done);
        assert_eq!(progress_label(&done, 4), "Complete!");
    }

    #[test]
    fn main_series_brightens_per_revealed_hop() {
        assert_eq!(main_series_opacity(0), 0.15);
        assert!((main_series_opacity(2) - 0.59).abs() < 1e-12);
        assert_eq!(main_series_opacity(4), 1.0);
        let v = revealed_values(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(v, [Some(1.0), Some(2.0), None, None]);
    }
}
