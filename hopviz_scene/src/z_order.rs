// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions shared by every surface.
//!
//! Surfaces are usually composed into one scene, so the layers are global rather than
//! per surface. Renderers sort by `(z_index, MarkId)`.

/// Panel backgrounds and frames.
pub const PANEL: i32 = -100;
/// Full-surface washes (cloud background, heat map).
pub const WASH: i32 = -50;
/// Chart gridlines.
pub const GRID_LINES: i32 = -40;

/// Static content: cloud points, badges, cells.
pub const CONTENT: i32 = 0;
/// Strokes drawn over content (series lines, ripples, trails).
pub const STROKES: i32 = 10;
/// Point-like highlights (series dots, match marker).
pub const HIGHLIGHTS: i32 = 20;

/// Labels.
pub const LABELS: i32 = 40;

/// Moving elements drawn above everything else.
pub const OVERLAY: i32 = 60;
/// Labels attached to overlay elements.
pub const OVERLAY_LABELS: i32 = 70;
