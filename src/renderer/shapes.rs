//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in surface pixels.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(center: Vec2, inner_radius: f32, outer_radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ring_sector(center, inner_radius, outer_radius, 0.0, 2.0 * PI, color, segments)
}

/// Part of a ring between two angles (radians, y pointing down)
pub fn ring_sector(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    start: f32,
    span: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let at = |r: f32, theta: f32| center + Vec2::from_angle(theta) * r;

    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * span;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * span;

        let inner1 = at(inner_radius, theta1);
        let outer1 = at(outer_radius, theta1);
        let inner2 = at(inner_radius, theta2);
        let outer2 = at(outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Axis-aligned filled rectangle from its top-left corner
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Stroked rounded rectangle, the stroke centered on the outline like a
/// canvas `strokeRect`
pub fn rounded_rect_outline(
    min: Vec2,
    size: Vec2,
    corner_radius: f32,
    line_width: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let half = line_width / 2.0;
    let r = corner_radius.min(size.x / 2.0).min(size.y / 2.0).max(0.0);
    let max = min + size;
    let mut vertices = Vec::with_capacity(4 * 6 + 4 * 6 * 6);

    // Straight edges between the corners
    let edges = [
        (Vec2::new(min.x + r, min.y - half), Vec2::new(size.x - 2.0 * r, line_width)),
        (Vec2::new(min.x + r, max.y - half), Vec2::new(size.x - 2.0 * r, line_width)),
        (Vec2::new(min.x - half, min.y + r), Vec2::new(line_width, size.y - 2.0 * r)),
        (Vec2::new(max.x - half, min.y + r), Vec2::new(line_width, size.y - 2.0 * r)),
    ];
    for (origin, extent) in edges {
        if extent.x > 0.0 && extent.y > 0.0 {
            vertices.extend_from_slice(&rect(origin, extent, color));
        }
    }

    // Quarter rings at the corners
    let inner = (r - half).max(0.0);
    let outer = r + half;
    let corners = [
        (Vec2::new(min.x + r, min.y + r), PI),
        (Vec2::new(max.x - r, min.y + r), -FRAC_PI_2),
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), FRAC_PI_2),
    ];
    for (center, start) in corners {
        vertices.extend(ring_sector(center, inner, outer, start, FRAC_PI_2, color, 6));
    }

    vertices
}
