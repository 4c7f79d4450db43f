//! A free-flying camera steered with discrete key steps, mouse look and the
//! scroll wheel.

use crate::math::prelude::*;

/// Default yaw in degrees, looking down the negative z axis.
pub const YAW: f32 = -90.0;
/// Default pitch in degrees.
pub const PITCH: f32 = 0.0;
/// Distance travelled by one movement step.
pub const SPEED: f32 = 0.1;
/// Degrees of rotation per unit of mouse motion.
pub const SENSITIVITY: f32 = 0.1;
/// Default and maximum vertical field of view, in degrees.
pub const ZOOM: f32 = 45.0;
/// Minimum vertical field of view, in degrees.
pub const MIN_ZOOM: f32 = 1.0;
/// Pitch is kept within `[-MAX_PITCH, MAX_PITCH]` degrees.
pub const MAX_PITCH: f32 = 89.0;

/// The six directions a movement step can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vector3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    speed: f32,
    sensitivity: f32,
    zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(Vector3::new(0.0, 0.0, 0.0), Vector3::unit_y(), YAW, PITCH)
    }
}

impl Camera {
    /// Creates a camera at `position`, oriented by `yaw` and `pitch` in degrees
    /// around `world_up`.
    pub fn new(position: Vector3<f32>, world_up: Vector3<f32>, yaw: f32, pitch: f32) -> Self {
        let mut camera = Camera {
            position,
            front: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::zero(),
            right: Vector3::zero(),
            world_up,
            yaw,
            pitch: clamp_pitch(pitch),
            speed: SPEED,
            sensitivity: SENSITIVITY,
            zoom: ZOOM,
        };

        camera.update_vectors();
        camera
    }

    /// Moves one step along the basis vector matching `direction`.
    pub fn process_movement(&mut self, direction: Direction) {
        let delta = match direction {
            Direction::Forward => self.front,
            Direction::Backward => -self.front,
            Direction::Left => -self.right,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => -self.up,
        };

        self.position += delta * self.speed;
    }

    /// Turns the camera by a mouse offset.
    pub fn process_look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = clamp_pitch(self.pitch + dy * self.sensitivity);
        self.update_vectors();
    }

    /// Narrows the field of view by `delta` degrees.
    pub fn process_zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom - delta).max(MIN_ZOOM).min(ZOOM);
    }

    /// Right-handed look-at matrix from the camera position along `front`.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at(eye, eye + self.front, self.up)
    }

    /// Perspective projection with the current zoom as vertical field of view.
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
        crate::math::perspective(Deg(self.zoom), aspect, near, far)
    }

    #[inline]
    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    #[inline]
    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    #[inline]
    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    #[inline]
    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());

        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[inline]
fn clamp_pitch(pitch: f32) -> f32 {
    pitch.max(-MAX_PITCH).min(MAX_PITCH)
}
