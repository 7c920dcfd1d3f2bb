use std::collections::HashSet;

use deskscene::camera::{Camera, Movement, Projection};
use glam::Vec2;
use sdl2::keyboard::Keycode;

const MOVEMENT_KEYS: [(Keycode, Movement); 6] = [
    (Keycode::W, Movement::Forward),
    (Keycode::S, Movement::Backward),
    (Keycode::A, Movement::Left),
    (Keycode::D, Movement::Right),
    (Keycode::E, Movement::Up),
    (Keycode::Q, Movement::Down),
];

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    pub pressed: HashSet<Keycode>,
}

/// Mouse movement and scrolling accumulated over one frame.
#[derive(Default)]
pub struct MouseState {
    pub delta: Vec2,
    pub scroll_delta: Vec2,
}

impl KeyboardState {
    pub fn start_frame(&mut self) {
        self.pressed.clear();
    }
}

impl MouseState {
    pub fn start_frame(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }
}

/// Applies one frame of input to the camera.
pub fn drive_camera(camera: &mut Camera, keyboard: &KeyboardState, mouse: &MouseState, delta_time: f32) {
    for (key, movement) in MOVEMENT_KEYS {
        if keyboard.down.contains(&key) {
            camera.travel(movement, delta_time);
        }
    }
    if keyboard.pressed.contains(&Keycode::P) {
        camera.projection = Projection::Perspective;
    }
    if keyboard.pressed.contains(&Keycode::O) {
        camera.projection = Projection::Orthographic;
    }
    if mouse.delta != Vec2::ZERO {
        camera.look(mouse.delta.x, mouse.delta.y);
    }
    if mouse.scroll_delta.y != 0.0 {
        camera.scroll(mouse.scroll_delta.y);
    }
}

#[cfg(test)]
mod tests {
    use deskscene::camera::CameraSettings;

    use super::*;

    #[test]
    fn held_keys_move_and_pressed_keys_toggle() {
        let mut camera = Camera::new(&CameraSettings::default());
        let start = camera.position;
        let mut keyboard = KeyboardState::default();
        keyboard.down.insert(Keycode::E);
        keyboard.pressed.insert(Keycode::O);

        drive_camera(&mut camera, &keyboard, &MouseState::default(), 1.0);

        assert_eq!(camera.projection, Projection::Orthographic);
        assert!(camera.position.y > start.y);
        assert_eq!(camera.position.x, start.x);
    }

    #[test]
    fn scrolling_changes_speed() {
        let mut camera = Camera::new(&CameraSettings::default());
        let speed = camera.speed;
        let mouse = MouseState {
            delta: Vec2::ZERO,
            scroll_delta: Vec2::new(0.0, 2.0),
        };

        drive_camera(&mut camera, &KeyboardState::default(), &mouse, 0.016);

        assert!(camera.speed > speed);
    }
}
