// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use hopviz_anim::visual;
use hopviz_anim::{
    AnimationConfig, AnimationPhase, AnimationState, ManualScheduler, Orchestrator,
};

use crate::{CloudConfig, Mark, PageScene};

fn page() -> PageScene {
    PageScene::new(&AnimationConfig::default(), CloudConfig::default())
}

fn run_states(frame_interval: f64) -> Vec<AnimationState> {
    let mut o = Orchestrator::new(AnimationConfig::default(), ManualScheduler::new());
    o.set_in_view(true);
    let mut states = Vec::new();
    let _ = o.run_until(30_000.0, frame_interval, |_, s| states.push(s));
    states
}

fn assert_paint_order(marks: &[Mark]) {
    for pair in marks.windows(2) {
        assert!(
            (pair[0].z_index, pair[0].id) < (pair[1].z_index, pair[1].id),
            "{:?} before {:?}",
            pair[0].id,
            pair[1].id
        );
    }
}

#[test]
fn every_frame_of_a_run_has_unique_ordered_marks() {
    let page = page();
    for state in run_states(1000.0 / 30.0) {
        let marks = page.marks(&state);
        assert_paint_order(&marks);
        let ids: BTreeSet<_> = marks.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), marks.len(), "{state:?}");
    }
}

#[test]
fn cloud_field_is_unchanged_by_a_full_run() {
    let page = page();
    let before = page.cloud().field().clone();
    for state in run_states(1000.0 / 60.0) {
        let _ = page.marks(&state);
    }
    assert_eq!(page.cloud().field(), &before);
}

#[test]
fn flight_leaves_from_the_match_marker() {
    let page = page();
    for hop in 0..3 {
        let state = AnimationState::at(hop, AnimationPhase::DocumentReturning, 0.0);
        let pose = page.flight().flight(&state).unwrap();
        let marker = page.cloud_origin() + page.cloud().target(hop).to_vec2();
        assert!((pose.pos - marker).hypot() < 1e-9, "hop {hop}");
    }
}

#[test]
fn vector_arrives_at_the_same_target() {
    let page = page();
    let cloud = page.cloud();
    let state = AnimationState::at(1, AnimationPhase::VectorTraveling, 1.0);
    let pos = visual::vector_position(
        &state,
        cloud.config().entry(),
        cloud.size(),
        cloud.target(1),
    )
    .unwrap();
    assert!((pos - cloud.target(1)).hypot() < 1e-9);
}

#[test]
fn replay_control_sits_inside_the_page() {
    let page = page();
    let r = page.replay_rect();
    let size = page.size();
    assert!(r.x0 >= 0.0 && r.x1 <= size.width, "{r:?} in {size:?}");
    assert!(r.y0 >= 0.0 && r.y1 <= size.height, "{r:?} in {size:?}");
}
