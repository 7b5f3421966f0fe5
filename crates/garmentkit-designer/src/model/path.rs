use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Point, Stroke};

/// A freehand or vector stroke: an ordered polyline of points relative
/// to the node origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub points: SmallVec<[Point; 8]>,
    pub stroke: Stroke,
    pub closed: bool,
}

impl PathNode {
    pub fn new(stroke: Stroke) -> Self {
        Self {
            points: SmallVec::new(),
            stroke,
            closed: false,
        }
    }

    pub fn from_points(points: &[Point], closed: bool) -> Self {
        Self {
            points: points.iter().copied().collect(),
            stroke: Stroke::default(),
            closed,
        }
    }

    pub fn push_point(&mut self, p: Point) {
        self.points.push(p);
    }

    /// Total polyline length, including the closing segment when closed.
    pub fn length(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        let mut total: f64 = self
            .points
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .sum();
        if self.closed {
            if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
                total += last.distance_to(first);
            }
        }
        total
    }

    /// Width/height of the point cloud's bounding box.
    pub fn extent(&self) -> (f64, f64) {
        if self.points.is_empty() {
            return (0.0, 0.0);
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        (max_x - min_x, max_y - min_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_open_and_closed() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let open = PathNode::from_points(&square, false);
        assert!((open.length() - 30.0).abs() < 1e-9);
        let closed = PathNode::from_points(&square, true);
        assert!((closed.length() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_length() {
        let mut path = PathNode::new(Stroke::default());
        assert_eq!(path.length(), 0.0);
        path.push_point(Point::new(5.0, 5.0));
        assert_eq!(path.length(), 0.0);
    }
}
