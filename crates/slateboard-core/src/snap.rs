//! Grid alignment for tool input and grid rendering.

use kurbo::Point;

/// Default grid spacing in board units.
pub const GRID_SIZE: f64 = 20.0;

/// Snap a point to the nearest grid intersection.
///
/// A non-positive or non-finite grid size leaves the point alone.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    if grid_size <= 0.0 || !grid_size.is_finite() {
        return point;
    }
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Grid line coordinates covering `[min, max]`.
pub fn grid_lines(min: f64, max: f64, grid_size: f64) -> impl Iterator<Item = f64> {
    let (first, last) = if grid_size > 0.0 && min <= max {
        ((min / grid_size).ceil() as i64, (max / grid_size).floor() as i64)
    } else {
        (1, 0)
    };
    (first..=last).map(move |i| i as f64 * grid_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_grid() {
        assert_eq!(snap_to_grid(Point::new(15.0, 25.0), 20.0), Point::new(20.0, 20.0));
        assert_eq!(snap_to_grid(Point::new(-9.0, -11.0), 20.0), Point::new(0.0, -20.0));
    }

    #[test]
    fn test_snap_disabled_for_bad_grid() {
        let point = Point::new(3.0, 4.0);
        assert_eq!(snap_to_grid(point, 0.0), point);
        assert_eq!(snap_to_grid(point, f64::NAN), point);
    }

    #[test]
    fn test_grid_lines() {
        let lines: Vec<f64> = grid_lines(-5.0, 45.0, 20.0).collect();
        assert_eq!(lines, vec![0.0, 20.0, 40.0]);
        assert_eq!(grid_lines(1.0, 19.0, 20.0).count(), 0);
        assert_eq!(grid_lines(0.0, 10.0, 0.0).count(), 0);
    }
}
