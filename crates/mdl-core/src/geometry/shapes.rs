//! Local-space geometry generators.
//!
//! Each generator appends to a scratch buffer: triangles as three columns,
//! edges as two. Triangles wind counter-clockwise when seen from outside the
//! solid. Generators check capacity before appending anything, so a refused
//! shape leaves the buffer as it was.

use std::f64::consts::{PI, TAU};

use glam::{DVec3, DVec4};

use super::scratch::{Overflow, ScratchBuffer};
use crate::math::point;

/// Columns a sphere generates at sampling `step`, saturating at `usize::MAX`.
pub fn sphere_columns(step: usize) -> usize {
    grid_columns(step, step.saturating_sub(1))
}

/// Columns a torus generates at sampling `step`, saturating at `usize::MAX`.
pub fn torus_columns(step: usize) -> usize {
    grid_columns(step, step)
}

/// Two triangles per grid cell.
fn grid_columns(rows: usize, cols: usize) -> usize {
    rows.checked_mul(cols)
        .and_then(|cells| cells.checked_mul(6))
        .unwrap_or(usize::MAX)
}

/// Append an edge from `p0` to `p1`.
pub fn add_edge<const N: usize>(
    buf: &mut ScratchBuffer<N>,
    p0: DVec3,
    p1: DVec3,
) -> Result<(), Overflow> {
    buf.push_edge(p0.extend(1.0), p1.extend(1.0))
}

/// Append a box with one corner at `corner`, extending `size.x` along +x,
/// `size.y` along -y and `size.z` along -z.
pub fn add_box<const N: usize>(
    buf: &mut ScratchBuffer<N>,
    corner: DVec3,
    size: DVec3,
) -> Result<(), Overflow> {
    buf.reserve(36)?;

    let (x0, y0, z0) = (corner.x, corner.y, corner.z);
    let (x1, y1, z1) = (x0 + size.x, y0 - size.y, z0 - size.z);

    let quads = [
        // front
        [point(x0, y0, z0), point(x0, y1, z0), point(x1, y1, z0), point(x1, y0, z0)],
        // back
        [point(x1, y0, z1), point(x1, y1, z1), point(x0, y1, z1), point(x0, y0, z1)],
        // right
        [point(x1, y0, z0), point(x1, y1, z0), point(x1, y1, z1), point(x1, y0, z1)],
        // left
        [point(x0, y0, z1), point(x0, y1, z1), point(x0, y1, z0), point(x0, y0, z0)],
        // top
        [point(x0, y0, z1), point(x0, y0, z0), point(x1, y0, z0), point(x1, y0, z1)],
        // bottom
        [point(x0, y1, z0), point(x0, y1, z1), point(x1, y1, z1), point(x1, y1, z0)],
    ];

    for [a, b, c, d] in quads {
        buf.push_triangle(a, b, c)?;
        buf.push_triangle(a, c, d)?;
    }
    Ok(())
}

/// Sample `step` half-circle meridians of a sphere, `step + 1` points each.
fn sphere_points(center: DVec3, radius: f64, step: usize) -> Vec<DVec4> {
    let mut points = Vec::with_capacity(step * (step + 1));
    for rot in 0..step {
        let phi = TAU * rot as f64 / step as f64;
        for circ in 0..=step {
            let theta = PI * circ as f64 / step as f64;
            points.push(point(
                radius * theta.cos() + center.x,
                radius * theta.sin() * phi.cos() + center.y,
                radius * theta.sin() * phi.sin() + center.z,
            ));
        }
    }
    points
}

/// Append a sphere sampled with `step` meridians and `step` latitude bands.
pub fn add_sphere<const N: usize>(
    buf: &mut ScratchBuffer<N>,
    center: DVec3,
    radius: f64,
    step: usize,
) -> Result<(), Overflow> {
    buf.reserve(sphere_columns(step))?;
    if step < 2 {
        return Ok(());
    }

    let points = sphere_points(center, radius, step);
    let per_meridian = step + 1;
    let total = points.len();

    for lat in 0..step {
        for longt in 0..step {
            let p0 = lat * per_meridian + longt;
            let p1 = p0 + 1;
            let p2 = (p1 + per_meridian) % total;
            let p3 = (p0 + per_meridian) % total;

            // The bands touching a pole collapse to a single triangle.
            if longt != step - 1 {
                buf.push_triangle(points[p0], points[p1], points[p2])?;
            }
            if longt != 0 {
                buf.push_triangle(points[p0], points[p2], points[p3])?;
            }
        }
    }
    Ok(())
}

/// Sample `step` cross-sections of a torus, `step` points each.
fn torus_points(center: DVec3, tube: f64, ring: f64, step: usize) -> Vec<DVec4> {
    let mut points = Vec::with_capacity(step * step);
    for rot in 0..step {
        let phi = TAU * rot as f64 / step as f64;
        for circ in 0..step {
            let theta = TAU * circ as f64 / step as f64;
            let reach = tube * theta.cos() + ring;
            points.push(point(
                phi.cos() * reach + center.x,
                tube * theta.sin() + center.y,
                -phi.sin() * reach + center.z,
            ));
        }
    }
    points
}

/// Append a torus around the y axis through `center`.
pub fn add_torus<const N: usize>(
    buf: &mut ScratchBuffer<N>,
    center: DVec3,
    tube: f64,
    ring: f64,
    step: usize,
) -> Result<(), Overflow> {
    buf.reserve(torus_columns(step))?;

    let points = torus_points(center, tube, ring, step);
    let idx = |rot: usize, circ: usize| (rot % step) * step + (circ % step);

    for rot in 0..step {
        for circ in 0..step {
            let p0 = idx(rot, circ);
            let p1 = idx(rot, circ + 1);
            let p2 = idx(rot + 1, circ + 1);
            let p3 = idx(rot + 1, circ);

            buf.push_triangle(points[p0], points[p2], points[p1])?;
            buf.push_triangle(points[p0], points[p3], points[p2])?;
        }
    }
    Ok(())
}
