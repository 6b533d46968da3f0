//! Radar chart — nine audio-feature axes drawn on a braille canvas.
//!
//! Geometry lives in pure functions over math coordinates (y up, radius 1.0
//! for a full-strength value): axis 0 points straight up and successive axes
//! proceed clockwise. The canvas widget maps those coordinates onto the
//! terminal cell grid.

use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::{
    layout::Rect,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine},
        Block, Borders,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use vibes_core::dashboard::{FeatureAverages, FEATURE_LABELS};

use crate::app_state::AppState;
use crate::component::Component;
use crate::theme;

pub const AXES: usize = FEATURE_LABELS.len();
/// Concentric reference rings, as fractions of full radius.
pub const RING_LEVELS: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];
const LABEL_RADIUS: f64 = 1.12;

// Wider than tall: terminal cells are roughly twice as high as wide, so a
// symmetric bound would squash the chart.
const X_BOUND: f64 = 1.9;
const Y_BOUND: f64 = 1.35;

/// Angle of axis `i` in math coordinates. Axis 0 is straight up; increasing
/// `i` rotates clockwise on screen.
pub fn axis_angle(i: usize) -> f64 {
    -FRAC_PI_2 + i as f64 * TAU / AXES as f64
}

/// Point on axis `i` at radius `r`, in math coordinates (y up).
pub fn axis_point(i: usize, r: f64) -> (f64, f64) {
    let a = axis_angle(i);
    (r * a.cos(), -r * a.sin())
}

/// The value polygon's vertices, one per axis, values clamped to [0,1].
pub fn polygon_points(avg: &FeatureAverages) -> Vec<(f64, f64)> {
    avg.0
        .iter()
        .enumerate()
        .map(|(i, v)| axis_point(i, v.clamp(0.0, 1.0)))
        .collect()
}

fn draw_ring(ctx: &mut Context, r: f64) {
    for i in 0..AXES {
        let (x1, y1) = axis_point(i, r);
        let (x2, y2) = axis_point((i + 1) % AXES, r);
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color: theme::C_MUTED,
        });
    }
}

fn draw_polygon(ctx: &mut Context, points: &[(f64, f64)]) {
    // Spokes from the centre stand in for a filled interior, which a
    // line-only canvas can't do.
    for &(x, y) in points {
        ctx.draw(&CanvasLine {
            x1: 0.0,
            y1: 0.0,
            x2: x,
            y2: y,
            color: theme::C_ACCENT,
        });
    }
    for i in 0..points.len() {
        let (x1, y1) = points[i];
        let (x2, y2) = points[(i + 1) % points.len()];
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color: theme::C_ACCENT,
        });
    }
}

pub struct Radar;

impl Component for Radar {
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(avg) = state.avg_features else {
            return;
        };

        // One label character's width in canvas units, for centring text.
        let char_w = (2.0 * X_BOUND) / area.width.max(1) as f64;

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::style_border())
                    .title(Span::styled(" sound radar ", theme::style_accent())),
            )
            .marker(Marker::Braille)
            .x_bounds([-X_BOUND, X_BOUND])
            .y_bounds([-Y_BOUND, Y_BOUND])
            .paint(move |ctx| {
                for r in RING_LEVELS {
                    draw_ring(ctx, r);
                }
                for i in 0..AXES {
                    let (x, y) = axis_point(i, 1.0);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2: x,
                        y2: y,
                        color: theme::C_AXIS,
                    });
                }

                draw_polygon(ctx, &polygon_points(&avg));

                ctx.layer();
                for (i, label) in FEATURE_LABELS.iter().enumerate() {
                    let (x, y) = axis_point(i, LABEL_RADIUS);
                    // Anchor the label's near edge to the axis: left half of
                    // the chart right-aligns, the top/bottom axes centre.
                    let width = label.width() as f64 * char_w;
                    let a = axis_angle(i);
                    let lx = if a.cos().abs() < 1e-6 {
                        x - width / 2.0
                    } else if a.cos() < 0.0 {
                        x - width
                    } else {
                        x
                    };
                    ctx.print(
                        lx,
                        y,
                        Line::from(Span::styled(*label, theme::style_secondary())),
                    );
                }
            });

        frame.render_widget(canvas, area);
    }
}
