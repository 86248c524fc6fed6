use glam::Vec3;
use marchview_common::{cross, normalize};
use marchview_input::{Action, BINDINGS, Direction, InputState, TurnAxis};

/// Eye translation per tick while a movement key is held.
pub const MOVE_SPEED: f32 = 0.005;
/// Angle change in radians per tick while a turn key is held.
pub const TURN_SPEED: f32 = 0.01;

/// Basis vectors derived once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub back: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

impl Basis {
    fn along(&self, direction: Direction) -> Vec3 {
        match direction {
            Direction::Up => self.up,
            Direction::Back => self.back,
            Direction::Right => self.right,
        }
    }
}

/// Fly camera driven by held keys, one step per tick.
///
/// Yaw and pitch accumulate without wraparound or clamping; they only ever
/// feed sine terms. The back vector is `normalize(-sin(yaw), -sin(pitch),
/// -cos(yaw))`, which is not a spherical parametrization. Steep pitch bends
/// the direction less than a textbook camera would.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub up: Vec3,
    pub move_speed: f32,
    pub turn_speed: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -2.0),
            yaw: 0.0,
            pitch: 0.0,
            up: Vec3::Y,
            move_speed: MOVE_SPEED,
            turn_speed: TURN_SPEED,
        }
    }
}

impl CameraState {
    pub fn up(&self) -> Vec3 {
        normalize(self.up)
    }

    pub fn back(&self) -> Vec3 {
        normalize(Vec3::new(
            -self.yaw.sin(),
            -self.pitch.sin(),
            -self.yaw.cos(),
        ))
    }

    pub fn right(&self) -> Vec3 {
        normalize(cross(self.back(), self.up()))
    }

    pub fn basis(&self) -> Basis {
        let back = self.back();
        let up = self.up();
        Basis {
            back,
            up,
            right: normalize(cross(back, up)),
        }
    }

    /// `position += direction * speed * sign`.
    pub fn move_along(&mut self, direction: Vec3, sign: f32, speed: f32) {
        self.position += direction * speed * sign;
    }

    pub fn turn(&mut self, axis: TurnAxis, delta: f32) {
        match axis {
            TurnAxis::Yaw => self.yaw += delta,
            TurnAxis::Pitch => self.pitch += delta,
        }
    }

    /// Perform one bound action against a basis snapshot.
    pub fn apply(&mut self, action: Action, basis: &Basis) {
        match action {
            Action::Move { along, sign } => {
                self.move_along(basis.along(along), sign, self.move_speed)
            }
            Action::Turn { axis, sign } => self.turn(axis, sign * self.turn_speed),
        }
    }

    /// Advance one tick: apply every binding whose key is held.
    pub fn advance(&mut self, input: &InputState) {
        let basis = self.basis();
        for (key, action) in BINDINGS {
            if input.is_held(key) {
                self.apply(action, &basis);
            }
        }
    }
}
