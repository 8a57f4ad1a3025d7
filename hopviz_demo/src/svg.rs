// Copyright 2025 the HopViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a mark list.

use hopviz_scene::{
    Mark, MarkPayload, Paint, RadialGradient, Stroke, TextAnchor, TextBaseline, TextMark,
    sort_marks,
};
use kurbo::Rect;
use peniko::Color;

#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    marks: Vec<Mark>,
    view_box: Option<Rect>,
}

/// Accumulates `<defs>` entries while the body is written.
#[derive(Debug, Default)]
struct Defs {
    out: String,
    next: usize,
}

impl Defs {
    fn radial(&mut self, g: &RadialGradient) -> String {
        let id = format!("g{}", self.next);
        self.next += 1;
        self.out.push_str(&format!(
            r#"<radialGradient id="{id}" gradientUnits="userSpaceOnUse" cx="{}" cy="{}" r="{}">"#,
            g.center.x, g.center.y, g.radius
        ));
        for stop in &g.stops {
            let (color, opacity) = svg_color(stop.color);
            self.out.push_str(&format!(
                r#"<stop offset="{}" stop-color="{color}" stop-opacity="{}"/>"#,
                stop.offset,
                opacity.unwrap_or(1.0)
            ));
        }
        self.out.push_str("</radialGradient>\n");
        id
    }
}

impl SvgScene {
    pub(crate) fn new(mut marks: Vec<Mark>) -> Self {
        sort_marks(&mut marks);
        Self {
            marks,
            view_box: None,
        }
    }

    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = match (self.view_box, self.content_bounds()) {
            (Some(a), Some(b)) => a.union(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => Rect::new(0.0, 0.0, 100.0, 100.0),
        };

        let mut defs = Defs::default();
        let mut body = String::new();
        for mark in &self.marks {
            match &mark.payload {
                MarkPayload::Rect(r) => {
                    body.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        r.rect.x0,
                        r.rect.y0,
                        r.rect.width(),
                        r.rect.height(),
                    ));
                    if r.corner_radius > 0.0 {
                        body.push_str(&format!(r#" rx="{}""#, r.corner_radius));
                    }
                    write_paint_attr(&mut body, &mut defs, "fill", Some(&r.fill));
                    write_stroke_attrs(&mut body, &mut defs, r.stroke.as_ref());
                    body.push_str("/>\n");
                }
                MarkPayload::Path(p) => {
                    body.push_str(&format!(r#"<path d="{}""#, p.path.to_svg()));
                    write_paint_attr(&mut body, &mut defs, "fill", p.fill.as_ref());
                    write_stroke_attrs(&mut body, &mut defs, p.stroke.as_ref());
                    body.push_str("/>\n");
                }
                MarkPayload::Text(t) => write_text(&mut body, t),
            }
        }

        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet" font-family="system-ui, sans-serif">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');
        if !defs.out.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&defs.out);
            out.push_str("</defs>\n");
        }
        out.push_str(&body);
        out.push_str("</svg>\n");
        out
    }

    fn content_bounds(&self) -> Option<Rect> {
        let mut rect: Option<Rect> = None;
        for mark in &self.marks {
            let b = match &mark.payload {
                MarkPayload::Text(t) => Some(estimate_text_bounds(t)),
                other => other.bounds(),
            };
            let Some(b) = b else { continue };
            rect = Some(rect.map_or(b, |r| r.union(b)));
        }
        // Small margin so strokes and glows are not clipped.
        rect.map(|r| r.inflate(10.0, 10.0))
    }
}

fn write_text(out: &mut String, t: &TextMark) {
    let baseline = match t.baseline {
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Hanging => "hanging",
    };
    out.push_str(&format!(
        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
        t.pos.x, t.pos.y, t.font_size, baseline
    ));
    if t.bold {
        out.push_str(r#" font-weight="600""#);
    }
    if t.angle != 0.0 {
        out.push_str(&format!(
            r#" transform="rotate({} {} {})""#,
            t.angle, t.pos.x, t.pos.y
        ));
    }
    out.push_str(match t.anchor {
        TextAnchor::Start => r#" text-anchor="start""#,
        TextAnchor::Middle => r#" text-anchor="middle""#,
        TextAnchor::End => r#" text-anchor="end""#,
    });
    let (fill, opacity) = svg_color(t.fill);
    out.push_str(&format!(r#" fill="{fill}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" fill-opacity="{o}""#));
    }
    out.push('>');
    out.push_str(&escape_xml(&t.text));
    out.push_str("</text>\n");
}

fn estimate_text_bounds(t: &TextMark) -> Rect {
    // Roughly 0.6em per glyph; only used to size the view box.
    let width = 0.6 * t.font_size * t.text.chars().count() as f64;
    let half_height = 0.5 * t.font_size;
    let (x, y) = (t.pos.x, t.pos.y);
    let y_mid = match t.baseline {
        TextBaseline::Middle => y,
        TextBaseline::Alphabetic => y - 0.3 * t.font_size,
        TextBaseline::Hanging => y + 0.3 * t.font_size,
    };
    let (x0, x1) = match t.anchor {
        TextAnchor::Start => (x, x + width),
        TextAnchor::Middle => (x - width / 2.0, x + width / 2.0),
        TextAnchor::End => (x - width, x),
    };
    Rect::new(x0, y_mid - half_height, x1, y_mid + half_height)
}

fn svg_color(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let hex = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (hex, opacity)
}

fn write_paint_attr(out: &mut String, defs: &mut Defs, name: &str, paint: Option<&Paint>) {
    match paint {
        None => out.push_str(&format!(r#" {name}="none""#)),
        Some(Paint::Solid(color)) => {
            let (value, opacity) = svg_color(*color);
            out.push_str(&format!(r#" {name}="{value}""#));
            if let Some(o) = opacity {
                out.push_str(&format!(r#" {name}-opacity="{o}""#));
            }
        }
        Some(Paint::Radial(g)) => {
            let id = defs.radial(g);
            out.push_str(&format!(r#" {name}="url(#{id})""#));
        }
    }
}

fn write_stroke_attrs(out: &mut String, defs: &mut Defs, stroke: Option<&Stroke>) {
    let Some(s) = stroke.filter(|s| s.width > 0.0) else {
        return;
    };
    write_paint_attr(out, defs, "stroke", Some(&s.paint));
    out.push_str(&format!(r#" stroke-width="{}""#, s.width));
    if !s.dash.is_empty() {
        let dash: Vec<String> = s.dash.iter().map(f64::to_string).collect();
        out.push_str(&format!(r#" stroke-dasharray="{}""#, dash.join(" ")));
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
