//! Fly camera used to look around the desk.

use glam::{Mat4, Vec3};
use serde::Deserialize;

const MOUSE_SENSITIVITY: f32 = 0.1;
const PITCH_LIMIT: f32 = 89.0;
const MIN_SPEED: f32 = 0.5;
const MAX_SPEED: f32 = 20.0;
/// Half the height of the orthographic view volume in world units.
const ORTHO_HALF_HEIGHT: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Projection {
    Perspective,
    Orthographic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Starting values for the camera, read from the client config.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraSettings {
    pub position: [f32; 3],
    /// Degrees, -90 looks down -Z.
    pub yaw: f32,
    pub pitch: f32,
    /// World units per second.
    pub speed: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 2.5, 4.0],
            yaw: -90.0,
            pitch: -25.0,
            speed: 2.5,
            fov: 80.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub fov: f32,
    pub projection: Projection,
}

impl Camera {
    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            position: Vec3::from_array(settings.position),
            yaw: settings.yaw,
            pitch: settings.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            speed: settings.speed.clamp(MIN_SPEED, MAX_SPEED),
            fov: settings.fov,
            projection: Projection::Perspective,
        }
    }

    /// Unit vector the camera looks along.
    pub fn front(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective => {
                Mat4::perspective_rh_gl(self.fov.to_radians(), aspect_ratio, 0.1, 100.0)
            }
            Projection::Orthographic => {
                let half_width = ORTHO_HALF_HEIGHT * aspect_ratio;
                Mat4::orthographic_rh_gl(
                    -half_width,
                    half_width,
                    -ORTHO_HALF_HEIGHT,
                    ORTHO_HALF_HEIGHT,
                    0.1,
                    100.0,
                )
            }
        }
    }

    /// Moves the camera for `delta_time` seconds in the given direction.
    pub fn travel(&mut self, movement: Movement, delta_time: f32) {
        let front = self.front();
        let right = front.cross(Vec3::Y).normalize();
        let direction = match movement {
            Movement::Forward => front,
            Movement::Backward => -front,
            Movement::Left => -right,
            Movement::Right => right,
            Movement::Up => Vec3::Y,
            Movement::Down => -Vec3::Y,
        };
        self.position += direction * self.speed * delta_time;
    }

    /// Turns the camera by a mouse delta in pixels. Screen Y grows downwards.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * MOUSE_SENSITIVITY;
        self.pitch = (self.pitch - dy * MOUSE_SENSITIVITY).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Scroll wheel changes the movement speed.
    pub fn scroll(&mut self, amount: f32) {
        self.speed = (self.speed + amount * 0.5).clamp(MIN_SPEED, MAX_SPEED);
    }
}
