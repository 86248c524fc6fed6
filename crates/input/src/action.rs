/// Camera-relative direction a movement key pushes along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The normalized reference up vector.
    Up,
    /// The back vector, opposite the viewing direction.
    Back,
    /// `back × up`.
    Right,
}

/// Rotation angle a turn key adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAxis {
    Yaw,
    Pitch,
}

/// A camera action produced by a held key.
///
/// The camera consumes actions, never raw key strings, so the binding table
/// is the single place that decides what each key does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Translate the eye along a basis vector, scaled by `sign` (±1).
    Move { along: Direction, sign: f32 },
    /// Add `sign` (±1) times the turn speed to an angle.
    Turn { axis: TurnAxis, sign: f32 },
}

/// The fixed fly-camera key bindings, in the order they are applied each frame.
pub const BINDINGS: [(&str, Action); 10] = [
    ("e", Action::Move { along: Direction::Up, sign: 1.0 }),
    ("q", Action::Move { along: Direction::Up, sign: -1.0 }),
    ("w", Action::Move { along: Direction::Back, sign: -1.0 }),
    ("s", Action::Move { along: Direction::Back, sign: 1.0 }),
    ("a", Action::Move { along: Direction::Right, sign: -1.0 }),
    ("d", Action::Move { along: Direction::Right, sign: 1.0 }),
    ("ArrowRight", Action::Turn { axis: TurnAxis::Yaw, sign: 1.0 }),
    ("ArrowLeft", Action::Turn { axis: TurnAxis::Yaw, sign: -1.0 }),
    ("ArrowUp", Action::Turn { axis: TurnAxis::Pitch, sign: 1.0 }),
    ("ArrowDown", Action::Turn { axis: TurnAxis::Pitch, sign: -1.0 }),
];

/// Look up the action bound to a key identifier.
pub fn binding(key: &str) -> Option<Action> {
    BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, action)| *action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_are_bound() {
        assert_eq!(
            binding("w"),
            Some(Action::Move { along: Direction::Back, sign: -1.0 })
        );
        assert_eq!(
            binding("d"),
            Some(Action::Move { along: Direction::Right, sign: 1.0 })
        );
        assert_eq!(
            binding("e"),
            Some(Action::Move { along: Direction::Up, sign: 1.0 })
        );
    }

    #[test]
    fn arrow_keys_turn() {
        assert_eq!(
            binding("ArrowLeft"),
            Some(Action::Turn { axis: TurnAxis::Yaw, sign: -1.0 })
        );
        assert_eq!(
            binding("ArrowUp"),
            Some(Action::Turn { axis: TurnAxis::Pitch, sign: 1.0 })
        );
    }

    #[test]
    fn bindings_are_case_sensitive() {
        assert!(binding("W").is_none());
        assert!(binding("arrowup").is_none());
        assert!(binding("").is_none());
    }

    #[test]
    fn opposite_keys_cancel() {
        for (a, b) in [("e", "q"), ("w", "s"), ("a", "d")] {
            match (binding(a), binding(b)) {
                (
                    Some(Action::Move { along: da, sign: sa }),
                    Some(Action::Move { along: db, sign: sb }),
                ) => {
                    assert_eq!(da, db);
                    assert_eq!(sa + sb, 0.0);
                }
                other => panic!("unexpected bindings for {a}/{b}: {other:?}"),
            }
        }
    }

    #[test]
    fn every_key_bound_once() {
        for (i, (key, _)) in BINDINGS.iter().enumerate() {
            assert!(BINDINGS[i + 1..].iter().all(|(other, _)| other != key));
        }
    }
}
