use glam::Vec3;

// Shared layout/lighting/timing constants used by the core and the web frontend.

// Panel layout (local to each slot's base node)
pub const PANEL_FORWARD_Z: f32 = -4.0; // artwork, border and arrows sit this far in front of the axis
pub const ARTWORK_SIZE: [f32; 3] = [3.0, 2.0, 0.1];
pub const BORDER_SIZE: [f32; 3] = [3.2, 2.2, 0.09];
pub const ARROW_SIZE: [f32; 3] = [0.3, 0.3, 0.01];
pub const ARROW_OFFSET_X: f32 = 1.8; // previous arrow at -x, next arrow at +x

// Decoded artwork is downscaled to fit; WebGPU guarantees 8192 per 2D texture edge
pub const MAX_TEXTURE_EDGE: u32 = 4096;

// Colors
pub const BORDER_COLOR: [f32; 3] = [0.125, 0.125, 0.125]; // #202020
pub const ARTWORK_FALLBACK_COLOR: [f32; 3] = [0.45, 0.45, 0.48]; // untextured / failed panel
pub const ARROW_COLOR: [f32; 3] = [0.92, 0.92, 0.92];
pub const REFLECTOR_COLOR: [f32; 3] = [0.5, 0.5, 0.5]; // #7f7f7f tint
pub const CLEAR_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

// Spot light
pub const SPOT_POSITION: [f32; 3] = [0.0, 5.0, 0.0];
pub const SPOT_TARGET: [f32; 3] = [0.0, 0.5, -5.0];
pub const SPOT_INTENSITY: f32 = 100.0;
pub const SPOT_DISTANCE: f32 = 10.0;
pub const SPOT_ANGLE: f32 = 0.65; // radians, cone half-angle
pub const SPOT_PENUMBRA: f32 = 1.0;
pub const SPOT_DECAY: f32 = 2.0;
pub const AMBIENT_LIGHT: f32 = 0.08;

// Reflective floor
pub const REFLECTOR_RADIUS: f32 = 10.0;
pub const REFLECTOR_Y: f32 = -1.1;
pub const REFLECTOR_STRENGTH: f32 = 0.85; // mix between floor tint and reflected image

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Timing
pub const TRANSITION_MILLIS: u64 = 1000;
pub const IDLE_SPIN_PER_FRAME: f32 = 0.002; // radians added each frame in idle mode

#[inline]
pub fn spot_position_vec3() -> Vec3 {
    Vec3::from(SPOT_POSITION)
}

#[inline]
pub fn spot_target_vec3() -> Vec3 {
    Vec3::from(SPOT_TARGET)
}
