//! Plain SVG serialization of drawing stacks.

use crate::model::{Circle, Drawing, Label, Mark, Segment};
use std::fmt::Write as _;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Canvas fill. Transparent when unset.
    pub background: Option<String>,
    pub font_family: String,
    /// Chart coordinates grow upwards; SVG coordinates grow downwards.
    pub flip_y: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            background: Some("white".to_string()),
            font_family: "sans-serif".to_string(),
            flip_y: true,
        }
    }
}

/// Serializes `drawings` bottom to top onto a `width` x `height` canvas.
pub fn render_svg(
    drawings: &[Drawing],
    width: f64,
    height: f64,
    title: Option<&str>,
    options: &SvgRenderOptions,
) -> String {
    let y = |v: f64| if options.flip_y { height - v } else { v };

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt(width),
        h = fmt(height),
    );
    if let Some(title) = title {
        let _ = writeln!(&mut out, "<title>{}</title>", escape_xml(title));
    }
    if let Some(bg) = &options.background {
        let _ = writeln!(
            &mut out,
            r#"<rect class="background" width="100%" height="100%" fill="{}"/>"#,
            escape_attr(bg)
        );
    }

    for drawing in drawings {
        let _ = write!(
            &mut out,
            r#"<g class="layer" data-layer="{}">"#,
            escape_attr(&drawing.name)
        );
        for mark in &drawing.marks {
            match mark {
                Mark::Circles(cs) => cs.iter().for_each(|c| render_circle(&mut out, c, &y)),
                Mark::Lines(ls) => ls.iter().for_each(|s| render_segment(&mut out, s, &y)),
                Mark::Labels(ls) => ls
                    .iter()
                    .for_each(|l| render_label(&mut out, l, &y, &options.font_family)),
            }
        }
        out.push_str("</g>\n");
    }

    if let Some(title) = title {
        let _ = writeln!(
            &mut out,
            r#"<text class="chart-title" x="{}" y="16" font-family="{}" font-size="13" font-weight="bold" text-anchor="middle">{}</text>"#,
            fmt(width / 2.0),
            escape_attr(&options.font_family),
            escape_xml(title)
        );
    }
    out.push_str("</svg>\n");
    out
}

fn render_circle(out: &mut String, c: &Circle, y: &impl Fn(f64) -> f64) {
    let _ = write!(
        out,
        r#"<circle data-id="{}" cx="{}" cy="{}" r="{}" fill="{}" opacity="{}" stroke="{}" stroke-width="{}""#,
        escape_attr(&c.id),
        fmt(c.x),
        fmt(y(c.y)),
        fmt(c.r),
        escape_attr(c.fill.as_deref().unwrap_or("none")),
        fmt(c.opacity),
        escape_attr(&c.stroke),
        fmt(c.stroke_width),
    );
    if c.tooltip.is_empty() {
        out.push_str("/>");
        return;
    }
    out.push_str("><title>");
    for (idx, (k, v)) in c.tooltip.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{}: {}", escape_xml(k), escape_xml(v));
    }
    out.push_str("</title></circle>");
}

fn render_segment(out: &mut String, s: &Segment, y: &impl Fn(f64) -> f64) {
    let _ = write!(
        out,
        r#"<line data-source="{}" data-target="{}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
        escape_attr(&s.source),
        escape_attr(&s.target),
        fmt(s.x1),
        fmt(y(s.y1)),
        fmt(s.x2),
        fmt(y(s.y2)),
        escape_attr(&s.color),
        fmt(s.opacity),
        fmt(s.stroke_width),
    );
}

fn render_label(out: &mut String, l: &Label, y: &impl Fn(f64) -> f64, font_family: &str) {
    let _ = write!(
        out,
        r#"<text data-id="{}" x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
        escape_attr(&l.id),
        fmt(l.x),
        fmt(y(l.y)),
        escape_attr(font_family),
        fmt(l.size),
        escape_attr(&l.color),
        escape_xml(&l.text),
    );
}

pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}
