use super::vertex::Vertex;

/// Number of vertices in the spiral line strip.
pub const SPIRAL_SEGMENTS: u32 = 1000;

/// π as the spiral has always been drawn with it.
///
/// This is deliberately the two-decimal value, not `std::f32::consts::PI`:
/// the strip ends slightly short of a full turn.
pub const PI_APPROX: f32 = 3.14;

/// Parameters of the spiral generator.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpiralParams {
    /// Vertex count.
    pub segments: u32,
    /// Value of π used for the angular step.
    pub pi: f32,
    /// Radius reached at `i == segments` (never actually emitted).
    pub max_radius: f32,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            segments: SPIRAL_SEGMENTS,
            pi: PI_APPROX,
            max_radius: 0.5,
        }
    }
}

impl SpiralParams {
    /// Angle increment between consecutive vertices, in radians.
    pub fn angle_step(&self) -> f32 {
        2.0 * self.pi / self.segments as f32
    }

    /// Radius of vertex `i`; grows linearly from 0.
    pub fn radius(&self, i: u32) -> f32 {
        self.max_radius * i as f32 / self.segments as f32
    }
}

/// Builds the spiral: one turn outwards from the origin, colored by angle.
///
/// For vertex `i` with `angle = i * step`:
/// - position = `radius(i) * (cos angle, sin angle, 0)`
/// - color = `((cos angle + 1) / 2, (sin angle + 1) / 2, (0.5 + cos(angle / 2)) / 2)`
pub fn build_spiral(params: &SpiralParams) -> Vec<Vertex> {
    let step = params.angle_step();

    (0..params.segments)
        .map(|i| {
            let angle = i as f32 * step;
            let radius = params.radius(i);
            let (sin, cos) = angle.sin_cos();

            Vertex {
                position: [radius * cos, radius * sin, 0.0],
                color: [
                    (cos + 1.0) / 2.0,
                    (sin + 1.0) / 2.0,
                    (0.5 + (angle * 0.5).cos()) / 2.0,
                ],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FLOATS_PER_VERTEX;

    const EPS: f32 = 1e-5;

    fn spiral() -> Vec<Vertex> {
        build_spiral(&SpiralParams::default())
    }

    #[test]
    fn has_exactly_6000_floats() {
        let v = spiral();
        assert_eq!(v.len(), 1000);
        assert_eq!(Vertex::as_floats(&v).len(), 1000 * FLOATS_PER_VERTEX);
    }

    #[test]
    fn first_vertex_is_origin_with_known_color() {
        let v0 = spiral()[0];
        assert_eq!(v0.position, [0.0, 0.0, 0.0]);
        assert!((v0.color[0] - 1.0).abs() < EPS);
        assert!((v0.color[1] - 0.5).abs() < EPS);
        assert!((v0.color[2] - 0.75).abs() < EPS);
    }

    #[test]
    fn points_lie_on_their_radius() {
        let params = SpiralParams::default();
        for (i, v) in spiral().iter().enumerate() {
            let [x, y, z] = v.position;
            let r = params.radius(i as u32);
            assert!(x * x + y * y <= r * r + EPS, "vertex {i} off its circle");
            assert_eq!(z, 0.0);
        }
    }

    #[test]
    fn radius_is_monotonic() {
        let radii: Vec<f32> = spiral()
            .iter()
            .map(|v| (v.position[0].powi(2) + v.position[1].powi(2)).sqrt())
            .collect();
        for w in radii.windows(2) {
            assert!(w[1] + EPS >= w[0]);
        }
    }

    #[test]
    fn radius_stays_below_half() {
        let last = *spiral().last().unwrap();
        let r = (last.position[0].powi(2) + last.position[1].powi(2)).sqrt();
        assert!(r < 0.5);
        assert!((r - 0.4995).abs() < 1e-4);
    }

    #[test]
    fn red_and_green_are_unit_bounded() {
        for v in spiral() {
            assert!((0.0..=1.0).contains(&v.color[0]));
            assert!((0.0..=1.0).contains(&v.color[1]));
        }
    }

    #[test]
    fn truncated_pi_stops_short_of_a_full_turn() {
        let params = SpiralParams::default();
        let last_angle = (params.segments - 1) as f32 * params.angle_step();
        assert!(last_angle < 2.0 * std::f32::consts::PI);
        assert!((params.angle_step() - 0.00628).abs() < 1e-7);
    }

    #[test]
    fn segment_count_is_configurable() {
        let v = build_spiral(&SpiralParams { segments: 8, ..Default::default() });
        assert_eq!(v.len(), 8);
    }
}
