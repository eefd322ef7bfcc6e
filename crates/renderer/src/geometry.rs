//! Vertex data for the two effect meshes.
//!
//! Both meshes are generated once at start-up and never reallocated: a
//! four-corner quad covering clip space for the background gradient, and a
//! ring encoded as a triangle strip that alternates between an outer and an
//! inner rim vertex per angle sample. The per-sample radius jitter is what
//! gives the rings their hand-drawn look.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use rand::Rng;

/// Angle samples along the ring. The last sample repeats the first angle so
/// the strip closes.
pub const RING_POINT_COUNT: usize = 1000;

/// Two strip vertices (outer rim + inner rim) per angle sample.
pub const RING_VERTEX_COUNT: usize = RING_POINT_COUNT * 2;

/// Radius band the outer rim is jittered within.
pub const OUTER_RADIUS_BAND: (f32, f32) = (0.60, 0.65);

/// Radius band the inner rim is jittered within.
pub const INNER_RADIUS_BAND: (f32, f32) = (0.40, 0.45);

/// A full-screen quad corner.
///
/// Positions are signed bytes spanning [-1, 1]; two spare bytes pad the
/// stride to the 4-byte alignment wgpu requires of vertex buffers.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [i8; 2],
    _pad: [i8; 2],
}

impl QuadVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Sint8x2];

    const fn new(x: i8, y: i8) -> Self {
        Self {
            position: [x, y],
            _pad: [0; 2],
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Corner order forms a two-triangle strip covering clip space.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex::new(-1, 1),
    QuadVertex::new(-1, -1),
    QuadVertex::new(1, 1),
    QuadVertex::new(1, -1),
];

/// One ring strip vertex: the angle along the circle and the jittered
/// radius the vertex shader expands into a clip-space position.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RingVertex {
    pub angle: f32,
    pub radius: f32,
}

impl RingVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RingVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Builds the ring strip.
///
/// Angle samples are uniform over [0, 2π], inclusive of both endpoints;
/// each sample emits an outer and an inner rim vertex with its radius drawn
/// from the matching band.
pub fn generate_ring(rng: &mut impl Rng) -> Vec<RingVertex> {
    let mut vertices = Vec::with_capacity(RING_VERTEX_COUNT);
    for i in 0..RING_POINT_COUNT {
        let angle = TAU * i as f32 / (RING_POINT_COUNT - 1) as f32;
        vertices.push(RingVertex {
            angle,
            radius: rng.gen_range(OUTER_RADIUS_BAND.0..OUTER_RADIUS_BAND.1),
        });
        vertices.push(RingVertex {
            angle,
            radius: rng.gen_range(INNER_RADIUS_BAND.0..INNER_RADIUS_BAND.1),
        });
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ring_has_fixed_vertex_count() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(generate_ring(&mut rng).len(), RING_VERTEX_COUNT);
    }

    #[test]
    fn angles_cover_the_full_circle_inclusively() {
        let mut rng = StdRng::seed_from_u64(1);
        let ring = generate_ring(&mut rng);
        let mut last = f32::MIN;
        for (i, pair) in ring.chunks(2).enumerate() {
            let expected = TAU * i as f32 / (RING_POINT_COUNT - 1) as f32;
            assert_eq!(pair[0].angle, expected);
            assert_eq!(pair[1].angle, expected);
            assert!(pair[0].angle >= last, "angles must not decrease");
            last = pair[0].angle;
        }
        assert_eq!(ring[0].angle, 0.0);
        // The closing sample lands on 2π up to rounding of the division.
        assert!((ring[ring.len() - 1].angle - TAU).abs() < 1e-5);
    }

    #[test]
    fn radii_stay_inside_their_bands() {
        let mut rng = StdRng::seed_from_u64(2);
        let ring = generate_ring(&mut rng);
        for pair in ring.chunks(2) {
            assert!(pair[0].radius >= OUTER_RADIUS_BAND.0 && pair[0].radius < OUTER_RADIUS_BAND.1);
            assert!(pair[1].radius >= INNER_RADIUS_BAND.0 && pair[1].radius < INNER_RADIUS_BAND.1);
        }
    }

    #[test]
    fn identical_seeds_reproduce_identical_geometry() {
        let first = generate_ring(&mut StdRng::seed_from_u64(42));
        let second = generate_ring(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn quad_stride_is_buffer_aligned() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 4);
        assert_eq!(QUAD_VERTICES.len(), 4);
    }
}
