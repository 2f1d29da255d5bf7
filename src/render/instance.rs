use std::f32::consts::FRAC_PI_4;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::camera::Camera;
use crate::ecs::components::Body;
use crate::math::heading_vector;
use crate::snake::pack_rgba;

const EYE_WHITE: u32 = pack_rgba(0xFF, 0xFF, 0xFF, 0xFF);
const PUPIL: u32 = pack_rgba(0x00, 0x00, 0x00, 0xFF);
/// Pupils sit this far (world units) ahead of the eye center.
const PUPIL_LEAD: f32 = 2.0;

/// Per-instance data uploaded to GPU each frame.
/// Stride = 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    /// Screen position of the center (pixels).
    pub position: [f32; 2],
    pub radius: f32,
    /// RGBA color packed as u32.
    pub color: u32,
}

impl CircleInstance {
    #[inline]
    pub fn new(position: Vec2, radius: f32, color: u32) -> Self {
        Self {
            position: position.into(),
            radius,
            color,
        }
    }
}

/// Push one snake's circles, tail first so the head lands on top, followed by the eyes.
pub fn push_snake(
    out: &mut Vec<CircleInstance>,
    camera: &Camera,
    body: &Body,
    heading: f32,
    color: u32,
    head_scale: f32,
) {
    let len = body.len();
    for (i, &seg) in body.segments.iter().enumerate().rev() {
        let size = if i == 0 {
            body.radius * head_scale
        } else {
            body.radius
        };
        let taper = 0.8 + (1.0 - i as f32 / len as f32) * 0.4;
        out.push(CircleInstance::new(
            camera.world_to_screen(seg),
            size * taper,
            color,
        ));
    }

    let Some(head) = body.head() else {
        return;
    };
    let size = body.radius * head_scale;
    let forward = heading_vector(heading) * PUPIL_LEAD;
    let eyes = [heading - FRAC_PI_4, heading + FRAC_PI_4]
        .map(|a| camera.world_to_screen(head + heading_vector(a) * size * 0.5));
    for eye in eyes {
        out.push(CircleInstance::new(eye, size * 0.3, EYE_WHITE));
    }
    for eye in eyes {
        out.push(CircleInstance::new(eye + forward, size * 0.15, PUPIL));
    }
}
