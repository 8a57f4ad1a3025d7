// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plays the hop animation on a simulated 60 Hz clock and writes the keyframes to HTML.
mod html;
mod svg;

use hopviz_anim::{AnimationConfig, AnimationPhase, AnimationState, ManualScheduler, Orchestrator};
use hopviz_scene::{CloudConfig, PageScene, SiteConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const FRAME_MS: f64 = 1000.0 / 60.0;
const OUTPUT: &str = "hopviz_demo.html";

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hopviz_demo=info,hopviz_anim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AnimationConfig::default();
    let page = PageScene::new(&config, CloudConfig::default());
    let mut player = Orchestrator::new(config.clone(), ManualScheduler::new());

    let mut sections = vec![keyframe(
        &page,
        0.0,
        &player.state(),
        "Before the page scrolls into view.",
    )];

    player.set_in_view(true);
    let end =
        config.durations().total_ms(config.total_hops()) + config.settle_delay_ms() + 1000.0;

    // Mid-phase frames of the first hop.
    let mut captured: Vec<(f64, AnimationState)> = Vec::new();
    let mut frames = 0_usize;
    let done = player.run_until(end, FRAME_MS, |t, state| {
        frames += 1;
        let seen = captured.iter().any(|(_, s)| s.phase == state.phase);
        if state.current_hop == 0 && state.progress >= 0.5 && !seen {
            captured.push((t, state));
        }
    });
    tracing::info!(frames, at = player.scheduler().now(), "first run finished");

    for (t, state) in &captured {
        sections.push(keyframe(&page, *t, state, phase_description(state.phase)));
    }
    sections.push(keyframe(
        &page,
        player.scheduler().now(),
        &done,
        "All hops done; the replay button is offered.",
    ));

    // Replay at a different frame rate should land on the same final state.
    if player.replay() {
        let until = player.scheduler().now() + end;
        let replayed = player.run_until(until, 1000.0 / 144.0, |_, _| {});
        if replayed == done {
            tracing::info!("replay at 144 Hz matched the 60 Hz run");
        } else {
            tracing::warn!(?replayed, ?done, "replay diverged");
        }
    }

    let html = html::render_report("GRITHopper hop animation", &SiteConfig::default(), &sections);
    std::fs::write(OUTPUT, html).expect("write hopviz_demo.html");
    println!("wrote {OUTPUT}");
}

fn keyframe(
    page: &PageScene,
    t: f64,
    state: &AnimationState,
    description: &str,
) -> html::HtmlSection {
    let mut scene = svg::SvgScene::new(page.marks(state));
    scene.set_view_box(page.size().to_rect());
    html::HtmlSection {
        title: format!(
            "t = {t:.0} ms: hop {} {} ({:.0}%)",
            state.current_hop + 1,
            state.phase,
            state.progress * 100.0
        ),
        description: description.to_owned(),
        svg: scene.to_svg_string(),
    }
}

fn phase_description(phase: AnimationPhase) -> &'static str {
    match phase {
        AnimationPhase::Idle => "The context waits; nothing moves yet.",
        AnimationPhase::Processing => "The encoder reads the context and emits its tensor strip.",
        AnimationPhase::VectorTraveling => "The query vector crosses the cloud toward its target.",
        AnimationPhase::CloudSearching => "Neighbors light up around the nearest match.",
        AnimationPhase::DocumentReturning => "The matched passage flies back into the context.",
        AnimationPhase::ContextUpdating => "The new badge settles and the chart reveals the hop.",
    }
}
