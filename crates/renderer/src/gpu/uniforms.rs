use bytemuck::{Pod, Zeroable};

use crate::scene::{self, RING_INSTANCES};

/// CPU mirror of the background program's `BackgroundParams` block.
///
/// Written once at pipeline creation; the gradient colors never change.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct BackgroundUniforms {
    color_inner: [f32; 4],
    color_center: [f32; 4],
    color_outer: [f32; 4],
}

unsafe impl Zeroable for BackgroundUniforms {}
unsafe impl Pod for BackgroundUniforms {}

impl BackgroundUniforms {
    pub fn new() -> Self {
        Self {
            color_inner: scene::BACKGROUND_INNER,
            color_center: scene::BACKGROUND_CENTER,
            color_outer: scene::BACKGROUND_OUTER,
        }
    }
}

/// CPU mirror of the circle program's `CircleParams` block.
///
/// The layout must observe std140 rules: the vec2 slot is padded to a full
/// 16 bytes and the offsets array has a 16-byte element stride, matching
/// the `vec4 uPositions[5]` declaration on the GLSL side.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct CircleUniforms {
    color: [f32; 4],
    aspect_ratio: [f32; 2],
    _padding: [f32; 2],
    positions: [[f32; 4]; RING_INSTANCES],
}

unsafe impl Zeroable for CircleUniforms {}
unsafe impl Pod for CircleUniforms {}

impl CircleUniforms {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color: scene::RING_COLOR,
            aspect_ratio: scene::aspect_ratio(width, height),
            _padding: [0.0; 2],
            positions: [[0.0; 4]; RING_INSTANCES],
        }
    }

    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        self.aspect_ratio = scene::aspect_ratio(width, height);
    }

    pub fn set_offsets(&mut self, offsets: [[f32; 2]; RING_INSTANCES]) {
        for (slot, offset) in self.positions.iter_mut().zip(offsets) {
            slot[0] = offset[0];
            slot[1] = offset[1];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_match_their_std140_sizes() {
        assert_eq!(std::mem::size_of::<BackgroundUniforms>(), 48);
        // vec4 + padded vec2 + vec4[5]
        assert_eq!(std::mem::size_of::<CircleUniforms>(), 16 + 16 + 16 * RING_INSTANCES);
    }

    #[test]
    fn resize_updates_the_aspect_slot() {
        let mut uniforms = CircleUniforms::new(100, 100);
        assert_eq!(uniforms.aspect_ratio, [1.0, 1.0]);
        uniforms.set_aspect_ratio(200, 100);
        assert_eq!(uniforms.aspect_ratio, [1.0, 2.0]);
    }

    #[test]
    fn offsets_land_in_the_xy_lanes() {
        let mut uniforms = CircleUniforms::new(100, 100);
        uniforms.set_offsets(scene::ring_offsets(0.0));
        assert_eq!(uniforms.positions[0][0], 0.0);
        assert_eq!(uniforms.positions[0][1], 0.5);
        assert_eq!(uniforms.positions[1][1], 1.0);
        assert_eq!(uniforms.positions[0][2], 0.0);
        assert_eq!(uniforms.positions[0][3], 0.0);
    }
}
