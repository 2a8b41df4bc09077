//! Scanline triangle fill and Bresenham lines, both depth tested.

use glam::{DVec2, DVec3, DVec4};
use image::Rgb;

use super::frame::FrameBuffer;
use super::lighting::compute_lighting;
use super::Shading;
use crate::math::{surface_normal, to_vec3};

/// Draw a triangle list: cull faces turned away from the viewer, shade each
/// remaining triangle flat, and fill it.
pub fn draw_polygons(frame: &mut FrameBuffer, polygons: &[DVec4], shading: &Shading) {
    for tri in polygons.chunks_exact(3) {
        if !tri.iter().all(|col| col.is_finite()) {
            continue;
        }
        let normal = surface_normal(tri[0], tri[1], tri[2]);
        if normal.dot(shading.view) <= 0.0 {
            continue;
        }
        let color = compute_lighting(normal, shading);
        scanline_fill(frame, to_vec3(tri[0]), to_vec3(tri[1]), to_vec3(tri[2]), color);
    }
}

/// Draw an edge list in one color.
pub fn draw_lines(frame: &mut FrameBuffer, edges: &[DVec4], color: Rgb<u8>) {
    for edge in edges.chunks_exact(2) {
        draw_line(frame, to_vec3(edge[0]), to_vec3(edge[1]), color);
    }
}

/// Linear blend that stays finite for any finite endpoints.
fn mix(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Point on segment `a`-`b` at height `y`, as (x, z).
fn at_height(a: DVec3, b: DVec3, y: f64) -> (f64, f64) {
    let dy = b.y - a.y;
    if dy.abs() < f64::EPSILON || !dy.is_finite() {
        return (a.x, a.z);
    }
    let t = ((y - a.y) / dy).clamp(0.0, 1.0);
    (mix(a.x, b.x, t), mix(a.z, b.z, t))
}

/// Fill a triangle one row at a time, interpolating depth along each row.
///
/// Only rows and columns inside the frame are visited.
pub fn scanline_fill(frame: &mut FrameBuffer, a: DVec3, b: DVec3, c: DVec3, color: Rgb<u8>) {
    let mut v = [a, b, c];
    v.sort_by(|p, q| p.y.total_cmp(&q.y));
    let [bot, mid, top] = v;

    let last_row = f64::from(frame.height()) - 1.0;
    let y_start = bot.y.round().max(0.0);
    let y_end = top.y.round().min(last_row);
    if y_start.is_nan() || y_end.is_nan() || y_start > y_end {
        return;
    }

    for y in y_start as i64..=y_end as i64 {
        let yf = y as f64;
        let (x0, z0) = at_height(bot, top, yf);
        let (x1, z1) = if yf < mid.y {
            at_height(bot, mid, yf)
        } else {
            at_height(mid, top, yf)
        };
        draw_span(frame, y, (x0, z0), (x1, z1), color);
    }
}

/// Horizontal run between two (x, z) endpoints on row `y`, cut to the frame.
fn draw_span(frame: &mut FrameBuffer, y: i64, p: (f64, f64), q: (f64, f64), color: Rgb<u8>) {
    let ((xl, zl), (xr, zr)) = if p.0 <= q.0 { (p, q) } else { (q, p) };
    let x_start = xl.round();
    let x_end = xr.round();
    let width = x_end - x_start;

    let first = x_start.max(0.0);
    let last = x_end.min(f64::from(frame.width()) - 1.0);
    if first.is_nan() || last.is_nan() || first > last {
        return;
    }

    for x in first as i64..=last as i64 {
        let z = if width > 0.0 {
            mix(zl, zr, (x as f64 - x_start) / width)
        } else {
            zl.max(zr)
        };
        frame.plot(x, y, z, color);
    }
}

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// Cohen-Sutherland outcode of `p` against the rectangle `min..=max`.
fn outcode(p: DVec3, min: DVec2, max: DVec2) -> u8 {
    let mut code = 0;
    if p.x < min.x {
        code |= LEFT;
    } else if p.x > max.x {
        code |= RIGHT;
    }
    if p.y < min.y {
        code |= BOTTOM;
    } else if p.y > max.y {
        code |= TOP;
    }
    code
}

/// Fraction of the way from `a` to `b` where the coordinate reaches `bound`.
///
/// Works on halves so the difference stays finite for any finite inputs.
fn crossing(a: f64, b: f64, bound: f64) -> f64 {
    (bound * 0.5 - a * 0.5) / (b * 0.5 - a * 0.5)
}

/// Clip segment `p0`-`p1` to the rectangle `min..=max` in x and y.
///
/// Returns the clipped endpoints with z carried along, or `None` when the
/// segment misses the rectangle. Endpoints already inside are returned
/// unchanged.
fn clip_segment(
    mut p0: DVec3,
    mut p1: DVec3,
    min: DVec2,
    max: DVec2,
) -> Option<(DVec3, DVec3)> {
    if !p0.is_finite() || !p1.is_finite() {
        return None;
    }
    let mut code0 = outcode(p0, min, max);
    let mut code1 = outcode(p1, min, max);

    // Each pass moves one endpoint onto a side it was outside of.
    for _ in 0..8 {
        if code0 | code1 == 0 {
            return Some((p0, p1));
        }
        if code0 & code1 != 0 {
            return None;
        }
        let code = if code0 != 0 { code0 } else { code1 };
        let moved = if code & (LEFT | RIGHT) != 0 {
            let x = if code & LEFT != 0 { min.x } else { max.x };
            let t = crossing(p0.x, p1.x, x);
            DVec3::new(x, mix(p0.y, p1.y, t), mix(p0.z, p1.z, t))
        } else {
            let y = if code & BOTTOM != 0 { min.y } else { max.y };
            let t = crossing(p0.y, p1.y, y);
            DVec3::new(mix(p0.x, p1.x, t), y, mix(p0.z, p1.z, t))
        };
        if code == code0 {
            p0 = moved;
            code0 = outcode(p0, min, max);
        } else {
            p1 = moved;
            code1 = outcode(p1, min, max);
        }
    }
    (code0 | code1 == 0).then_some((p0, p1))
}

/// Bresenham line from `p0` to `p1` with linearly interpolated depth.
///
/// The segment is clipped to one pixel beyond the frame on every side first,
/// so the walk is bounded by the frame size.
pub fn draw_line(frame: &mut FrameBuffer, p0: DVec3, p1: DVec3, color: Rgb<u8>) {
    let max = DVec2::new(f64::from(frame.width()), f64::from(frame.height()));
    let Some((p0, p1)) = clip_segment(p0, p1, DVec2::splat(-1.0), max) else {
        return;
    };

    let (mut x, mut y) = (p0.x.round() as i64, p0.y.round() as i64);
    let (x1, y1) = (p1.x.round() as i64, p1.y.round() as i64);

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };

    let steps = dx.max(-dy).max(1) as f64;
    let dz = (p1.z - p0.z) / steps;
    let mut z = p0.z;
    let mut err = dx + dy;

    loop {
        frame.plot(x, y, z, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        z += dz;
    }
}
