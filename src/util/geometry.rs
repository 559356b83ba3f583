// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for coordinate transformations between
//! device pixel coordinates on the render surface and normalized image
//! coordinates, plus the distance and hit-testing helpers built on them.

use crate::models::hold::Point;

/// A position on the render surface, in device pixels relative to its
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePoint {
    pub x: f64,
    pub y: f64,
}

impl DevicePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the current render surface.
///
/// Both dimensions are always strictly positive; a surface that has not
/// been measured yet, or whose image has not decoded, has no viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    /// Create a viewport, or `None` if either dimension is not positive.
    pub fn new(width: f64, height: f64) -> Option<Self> {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            Some(Self { width, height })
        } else {
            None
        }
    }

    /// Fill the container width and scale the height by the image aspect ratio.
    pub fn fit_width(container_width: f64, image_size: (u32, u32)) -> Option<Self> {
        let (img_width, img_height) = image_size;
        if container_width <= 0.0 || img_width == 0 || img_height == 0 {
            return None;
        }
        let scale = container_width / img_width as f64;
        Self::new(container_width, img_height as f64 * scale)
    }

    /// Largest size that keeps the image aspect ratio and fits both the
    /// container width and the available height.
    pub fn fit_within(
        container_width: f64,
        available_height: f64,
        image_size: (u32, u32),
    ) -> Option<Self> {
        let (img_width, img_height) = image_size;
        if img_width == 0 || img_height == 0 {
            return None;
        }
        let scale_by_width = container_width / img_width as f64;
        let scale_by_height = available_height / img_height as f64;
        let scale = scale_by_width.min(scale_by_height);
        Self::new(img_width as f64 * scale, img_height as f64 * scale)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Convert device pixel coordinates to normalized coordinates (0.0 to 1.0).
pub fn to_normalized(device: DevicePoint, viewport: Viewport) -> Point {
    Point {
        x: device.x / viewport.width,
        y: device.y / viewport.height,
    }
}

/// Convert normalized coordinates to device pixel coordinates.
pub fn to_device(point: Point, viewport: Viewport) -> DevicePoint {
    DevicePoint {
        x: point.x * viewport.width,
        y: point.y * viewport.height,
    }
}

/// Euclidean distance between two normalized points, measured in device pixels.
pub fn distance(p1: Point, p2: Point, viewport: Viewport) -> f64 {
    let dx = (p1.x - p2.x) * viewport.width;
    let dy = (p1.y - p2.y) * viewport.height;
    (dx * dx + dy * dy).sqrt()
}

/// Interleaved `x, y` device pixel list for drawing a shape.
pub fn flatten_for_render(points: &[Point], viewport: Viewport) -> Vec<f64> {
    points
        .iter()
        .flat_map(|p| [p.x * viewport.width, p.y * viewport.height])
        .collect()
}

/// Check if a point is inside a polygon (ray casting algorithm).
///
/// A repeated closing vertex is harmless: it contributes a zero-length edge.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let vi = polygon[i];
        let vj = polygon[j];
        if ((vi.y > point.y) != (vj.y > point.y))
            && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Twice the signed area of a polygon (shoelace formula).
fn doubled_signed_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    (0..n)
        .map(|i| {
            let (a, b) = (polygon[i], polygon[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    cross(a, b, p) >= 0.0 && cross(b, c, p) >= 0.0 && cross(c, a, p) >= 0.0
}

/// Split a simple polygon into triangles (ear clipping).
///
/// Returns index triples into `polygon`, which must not repeat its first
/// vertex at the end. Self-intersecting outlines fall back to a fan for
/// whatever cannot be clipped.
pub fn triangulate(polygon: &[Point]) -> Vec<[usize; 3]> {
    let n = polygon.len();
    if n < 3 {
        return Vec::new();
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    if doubled_signed_area(polygon) < 0.0 {
        remaining.reverse();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    while remaining.len() > 3 {
        let m = remaining.len();
        let ear = (0..m).find(|&i| {
            let (a, b, c) = (remaining[(i + m - 1) % m], remaining[i], remaining[(i + 1) % m]);
            let (pa, pb, pc) = (polygon[a], polygon[b], polygon[c]);
            cross(pa, pb, pc) > 0.0
                && remaining
                    .iter()
                    .filter(|&&k| k != a && k != b && k != c)
                    .all(|&k| !in_triangle(polygon[k], pa, pb, pc))
        });
        let Some(i) = ear else {
            break;
        };
        triangles.push([remaining[(i + m - 1) % m], remaining[i], remaining[(i + 1) % m]]);
        remaining.remove(i);
    }

    for k in 1..remaining.len().saturating_sub(1) {
        triangles.push([remaining[0], remaining[k], remaining[k + 1]]);
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: f64, height: f64) -> Viewport {
        Viewport::new(width, height).unwrap()
    }

    #[test]
    fn test_normalize_denormalize_roundtrip() {
        let vp = viewport(1920.0, 1080.0);
        let device = DevicePoint::new(960.0, 540.0);

        let normalized = to_normalized(device, vp);
        let back = to_device(normalized, vp);

        assert!((back.x - device.x).abs() < 0.0001);
        assert!((back.y - device.y).abs() < 0.0001);
    }

    #[test]
    fn test_normalize_corners() {
        let vp = viewport(1920.0, 1080.0);

        let tl = to_normalized(DevicePoint::new(0.0, 0.0), vp);
        assert_eq!(tl, Point::new(0.0, 0.0));

        let br = to_normalized(DevicePoint::new(1920.0, 1080.0), vp);
        assert_eq!(br, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_zero_viewport_is_not_ready() {
        assert!(Viewport::new(0.0, 600.0).is_none());
        assert!(Viewport::new(800.0, 0.0).is_none());
        assert!(Viewport::fit_width(0.0, (4000, 3000)).is_none());
        assert!(Viewport::fit_width(800.0, (0, 0)).is_none());
        assert!(Viewport::fit_within(800.0, 600.0, (4000, 0)).is_none());
    }

    #[test]
    fn test_fit_width_keeps_aspect() {
        let vp = Viewport::fit_width(800.0, (4000, 3000)).unwrap();
        assert_eq!(vp.width(), 800.0);
        assert!((vp.height() - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_within_limited_by_height() {
        let vp = Viewport::fit_within(1000.0, 400.0, (2000, 1000)).unwrap();
        assert!((vp.width() - 800.0).abs() < 1e-9);
        assert!((vp.height() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance_is_in_device_pixels() {
        let vp = viewport(1000.0, 500.0);
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.003, 0.008);
        // 3px horizontally, 4px vertically
        assert!((distance(a, b, vp) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_flatten_for_render() {
        let vp = viewport(200.0, 100.0);
        let points = [Point::new(0.5, 0.5), Point::new(1.0, 0.25)];
        assert_eq!(flatten_for_render(&points, vp), vec![100.0, 50.0, 200.0, 25.0]);
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            Point::new(0.2, 0.2),
            Point::new(0.4, 0.2),
            Point::new(0.4, 0.4),
            Point::new(0.2, 0.4),
            Point::new(0.2, 0.2),
        ];
        assert!(point_in_polygon(Point::new(0.3, 0.3), &square));
        assert!(!point_in_polygon(Point::new(0.5, 0.3), &square));
        assert!(!point_in_polygon(Point::new(0.3, 0.3), &square[..2]));
    }

    fn area(polygon: &[Point]) -> f64 {
        doubled_signed_area(polygon).abs() / 2.0
    }

    #[test]
    fn test_triangulate_concave_outline() {
        // Arrow head with a reflex vertex at (0.5, 0.6)
        let arrow = [
            Point::new(0.2, 0.8),
            Point::new(0.5, 0.2),
            Point::new(0.8, 0.8),
            Point::new(0.5, 0.6),
        ];
        let triangles = triangulate(&arrow);
        assert_eq!(triangles.len(), 2);

        let covered: f64 = triangles
            .iter()
            .map(|t| area(&[arrow[t[0]], arrow[t[1]], arrow[t[2]]]))
            .sum();
        assert!((covered - area(&arrow)).abs() < 1e-12);

        // The notch below the reflex vertex stays empty
        for t in &triangles {
            let (a, b, c) = (arrow[t[0]], arrow[t[1]], arrow[t[2]]);
            let centroid = Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0);
            assert!(point_in_polygon(centroid, &arrow));
        }
    }

    #[test]
    fn test_triangulate_either_winding() {
        let square = [
            Point::new(0.2, 0.2),
            Point::new(0.4, 0.2),
            Point::new(0.4, 0.4),
            Point::new(0.2, 0.4),
        ];
        let mut reversed = square;
        reversed.reverse();

        assert_eq!(triangulate(&square).len(), 2);
        assert_eq!(triangulate(&reversed).len(), 2);
        assert!(triangulate(&square[..2]).is_empty());
    }
}
