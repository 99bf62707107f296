//! Square blackboard for jittered super-sampling.
//!
//! A blackboard is a finite square plane in 3D space, split into a grid of
//! cells. Sampling it yields the same number of randomly jittered points in
//! every cell (stratified jittering), which turns one ray into a beam that
//! approximates an area effect: soft shadows, glossy reflection, blurry
//! transparency or pixel antialiasing.

use rand::{Rng, RngCore};
use umbra_math::{Point, Vector};

/// An oriented square sampling plane.
#[derive(Debug, Clone, Copy)]
pub struct Blackboard {
    /// Cells per row and per column, always odd
    grid_size: usize,
    /// Side length of the whole board
    diameter: f64,
    center: Point,
    /// In-plane unit axes
    up: Vector,
    right: Vector,
}

impl Blackboard {
    /// Create a blackboard centered at `center`, perpendicular to `normal`.
    ///
    /// An even `grid_size` is bumped to the next odd value so the center
    /// cell sits on `center`. The normal may face either side of the board.
    pub fn new(grid_size: usize, diameter: f64, center: Point, normal: Vector) -> Self {
        let grid_size = if grid_size % 2 == 0 {
            log::debug!(
                "Blackboard grid size {} is even, using {}",
                grid_size,
                grid_size + 1
            );
            grid_size + 1
        } else {
            grid_size
        };

        // Seed with the world axis least aligned with the normal
        let a = normal.xyz().abs();
        let seed = if a.x <= a.y && a.x <= a.z {
            Vector::RIGHT
        } else if a.z <= a.y {
            Vector::FORWARD
        } else {
            Vector::UP
        };
        let up = normal.cross(&seed).normalize();
        let right = up.cross(&normal).normalize();

        Self {
            grid_size,
            diameter,
            center,
            up,
            right,
        }
    }

    /// Cells per row/column.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Side length of a single cell.
    pub fn cell_diameter(&self) -> f64 {
        self.diameter / self.grid_size as f64
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// In-plane `(right, up)` unit axes.
    pub fn axes(&self) -> (Vector, Vector) {
        (self.right, self.up)
    }

    /// Generate jittered sample points over the whole board.
    ///
    /// Every cell receives `ceil(total_points / cell_count)` samples, so the
    /// result holds at least `total_points` points and possibly more. Each
    /// sample is its cell center offset by two independent uniform values in
    /// [-1, 1] times half the cell size along `right` and `up`. Order carries
    /// no meaning.
    pub fn randomize_points(&self, total_points: usize, rng: &mut dyn RngCore) -> Vec<Point> {
        let cell_count = self.grid_size * self.grid_size;
        let per_cell = total_points.div_ceil(cell_count);

        let cell_diameter = self.cell_diameter();
        let half_cell = cell_diameter / 2.0;
        let half_grid = (self.grid_size / 2) as i64;

        let mut points = Vec::with_capacity(per_cell * cell_count);

        let right = self.right.xyz();
        let up = self.up.xyz();

        for i in -half_grid..=half_grid {
            let row_center = self.center.xyz() + right * (i as f64 * cell_diameter);

            for j in -half_grid..=half_grid {
                let cell_center = row_center + up * (j as f64 * cell_diameter);

                for _ in 0..per_cell {
                    let dx: f64 = rng.gen_range(-1.0..=1.0);
                    let dy: f64 = rng.gen_range(-1.0..=1.0);
                    let p = cell_center + right * (dx * half_cell) + up * (dy * half_cell);
                    points.push(Point::from(p));
                }
            }
        }

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Coordinates of `p` relative to the board center in (right, up) axes.
    fn local(board: &Blackboard, p: Point) -> (f64, f64) {
        let (right, up) = board.axes();
        let d = p.xyz() - board.center().xyz();
        (d.dot(right.xyz()), d.dot(up.xyz()))
    }

    #[test]
    fn test_even_grid_becomes_odd() {
        let board = Blackboard::new(4, 1.0, Point::ZERO, Vector::FORWARD);
        assert_eq!(board.grid_size(), 5);
        let board = Blackboard::new(0, 1.0, Point::ZERO, Vector::FORWARD);
        assert_eq!(board.grid_size(), 1);
        let board = Blackboard::new(9, 1.0, Point::ZERO, Vector::FORWARD);
        assert_eq!(board.grid_size(), 9);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let normals = [
            Vector::FORWARD,
            Vector::RIGHT,
            Vector::LEFT,
            Vector::UP,
            Vector::new(1.0, 2.0, -3.0).normalize(),
            // Almost on an axis
            Vector::new(1.0, 1e-170, 0.0),
            Vector::new(-1.0, 0.0, 1e-12),
            Vector::new(1e-9, 1.0, 1e-9),
        ];
        for n in normals {
            let board = Blackboard::new(3, 1.0, Point::ZERO, n);
            let (right, up) = board.axes();
            assert!((right.length() - 1.0).abs() < 1e-12);
            assert!((up.length() - 1.0).abs() < 1e-12);
            assert!(right.dot(&up).abs() < 1e-12);
            assert!(right.dot(&n).abs() < 1e-12);
            assert!(up.dot(&n).abs() < 1e-12);
        }
    }

    #[test]
    fn test_point_count_rounds_up() {
        let board = Blackboard::new(3, 2.0, Point::ZERO, Vector::FORWARD);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(board.randomize_points(9, &mut rng).len(), 9);
        assert_eq!(board.randomize_points(10, &mut rng).len(), 18);
        assert_eq!(board.randomize_points(1, &mut rng).len(), 9);
        assert!(board.randomize_points(0, &mut rng).is_empty());
    }

    #[test]
    fn test_points_stay_on_board() {
        let center = Point::new(3.0, -2.0, 7.0);
        let normal = Vector::new(0.3, 1.0, -0.5).normalize();
        let board = Blackboard::new(9, 4.0, center, normal);
        let mut rng = StdRng::seed_from_u64(99);

        let points = board.randomize_points(500, &mut rng);
        assert!(points.len() >= 500);
        for p in points {
            let (x, y) = local(&board, p);
            assert!(x.abs() <= 2.0 + 1e-9, "x = {x}");
            assert!(y.abs() <= 2.0 + 1e-9, "y = {y}");
            // Sample lies in the board plane
            assert!((p.xyz() - center.xyz()).dot(normal.xyz()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_every_cell_is_sampled() {
        let board = Blackboard::new(5, 5.0, Point::ZERO, Vector::BACKWARD);
        let mut rng = StdRng::seed_from_u64(3);
        let cell = board.cell_diameter();

        let mut counts = [[0usize; 5]; 5];
        for p in board.randomize_points(25, &mut rng) {
            let (x, y) = local(&board, p);
            let col = ((x / cell) + 2.5).floor().clamp(0.0, 4.0) as usize;
            let row = ((y / cell) + 2.5).floor().clamp(0.0, 4.0) as usize;
            counts[row][col] += 1;
        }
        for row in counts {
            for n in row {
                assert_eq!(n, 1);
            }
        }
    }

    #[test]
    fn test_jitter_spreads_within_cell() {
        // A single cell: samples should cover both halves of the board
        let board = Blackboard::new(1, 2.0, Point::ZERO, Vector::FORWARD);
        let mut rng = StdRng::seed_from_u64(11);
        let points = board.randomize_points(200, &mut rng);

        let (mut left, mut right) = (0, 0);
        for p in &points {
            let (x, _) = local(&board, *p);
            if x < 0.0 {
                left += 1;
            } else {
                right += 1;
            }
        }
        assert!(left > 50 && right > 50, "left={left} right={right}");
    }
}
