use minifb::{Key, MouseButton, MouseMode, Window};

/// One poll of the keyboard and mouse, decoupled from the windowing backend.
/// The camera and the settings reducer only ever see this snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InputState {
    // --- Movement (W/S/A/D or arrows) ---
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,

    // --- Mouse ---
    pub left_mouse: bool,
    pub right_mouse: bool,
    /// Cursor movement since the previous poll, in pixels.
    pub mouse_delta: (f32, f32),

    // --- Toggles (level state; edges are detected by the reducer) ---
    pub cycle_render_mode: bool,
    pub toggle_rotation: bool,
    pub toggle_normal_map: bool,
    pub cycle_shading_mode: bool,
}

/// Turns `minifb` window state into `InputState` snapshots.
#[derive(Debug, Default)]
pub struct InputPoller {
    last_mouse_pos: Option<(f32, f32)>,
}

impl InputPoller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll(&mut self, window: &Window) -> InputState {
        let key = |a: Key, b: Key| window.is_key_down(a) || window.is_key_down(b);

        let mouse_pos = window.get_mouse_pos(MouseMode::Pass);
        let mouse_delta = match (mouse_pos, self.last_mouse_pos) {
            (Some((x, y)), Some((last_x, last_y))) => (x - last_x, y - last_y),
            _ => (0.0, 0.0),
        };
        self.last_mouse_pos = mouse_pos;

        InputState {
            move_up: key(Key::W, Key::Up),
            move_down: key(Key::S, Key::Down),
            move_left: key(Key::A, Key::Left),
            move_right: key(Key::D, Key::Right),
            left_mouse: window.get_mouse_down(MouseButton::Left),
            right_mouse: window.get_mouse_down(MouseButton::Right),
            mouse_delta,
            cycle_render_mode: window.is_key_down(Key::F4),
            toggle_rotation: window.is_key_down(Key::F5),
            toggle_normal_map: window.is_key_down(Key::F6),
            cycle_shading_mode: window.is_key_down(Key::F7),
        }
    }
}
