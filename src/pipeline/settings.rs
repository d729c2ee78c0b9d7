use crate::ui::input::InputState;
use log::info;
use serde::Deserialize;

/// What the pixel shader writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Shaded surface, according to the shading mode.
    #[default]
    Texture,
    /// Greyscale depth visualization.
    Buffer,
}

impl RenderMode {
    const ALL: [RenderMode; 2] = [RenderMode::Texture, RenderMode::Buffer];

    /// Next mode in declaration order, wrapping around.
    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

/// Which lighting term is shown in `RenderMode::Texture`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    ObservedArea,
    Diffuse,
    Specular,
    #[default]
    Combined,
    Ambient,
}

impl ShadingMode {
    const ALL: [ShadingMode; 5] = [
        ShadingMode::ObservedArea,
        ShadingMode::Diffuse,
        ShadingMode::Specular,
        ShadingMode::Combined,
        ShadingMode::Ambient,
    ];

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let idx = all.iter().position(|&m| m == current).unwrap_or(0);
    all[(idx + 1) % all.len()]
}

/// Renderer switches, fixed for the duration of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub render_mode: RenderMode,
    pub shading_mode: ShadingMode,
    pub normal_map: bool,
    pub rotate: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Texture,
            shading_mode: ShadingMode::Combined,
            normal_map: true,
            rotate: false,
        }
    }
}

impl RenderSettings {
    /// Produces the settings for the next frame from the previous and current input snapshot.
    ///
    /// Toggles are edge-triggered: a key only acts on the poll where it goes from
    /// released to pressed, so holding it down does not keep cycling.
    pub fn apply_input(self, previous: &InputState, current: &InputState) -> Self {
        let pressed = |prev: bool, curr: bool| curr && !prev;
        let mut next = self;

        if pressed(previous.cycle_render_mode, current.cycle_render_mode) {
            next.render_mode = next.render_mode.next();
            info!("[RENDERMODE] {:?}", next.render_mode);
        }
        if pressed(previous.toggle_rotation, current.toggle_rotation) {
            next.rotate = !next.rotate;
            info!("[ROTATION] {}", if next.rotate { "enabled" } else { "disabled" });
        }
        if pressed(previous.toggle_normal_map, current.toggle_normal_map) {
            next.normal_map = !next.normal_map;
            info!("[NORMAL MAP] {}", if next.normal_map { "enabled" } else { "disabled" });
        }
        if pressed(previous.cycle_shading_mode, current.cycle_shading_mode) {
            next.shading_mode = next.shading_mode.next();
            info!("[SHADING MODE] {:?}", next.shading_mode);
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shading_mode_cycles_through_all_five() {
        let mut mode = ShadingMode::ObservedArea;
        let mut seen = vec![mode];
        for _ in 0..4 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(seen, ShadingMode::ALL.to_vec());
        assert_eq!(mode.next(), ShadingMode::ObservedArea);
    }

    #[test]
    fn render_mode_toggles() {
        assert_eq!(RenderMode::Texture.next(), RenderMode::Buffer);
        assert_eq!(RenderMode::Buffer.next(), RenderMode::Texture);
    }

    #[test]
    fn held_key_only_acts_once() {
        let released = InputState::default();
        let held = InputState {
            cycle_shading_mode: true,
            toggle_normal_map: true,
            ..Default::default()
        };

        let s0 = RenderSettings::default();
        let s1 = s0.apply_input(&released, &held);
        assert_eq!(s1.shading_mode, ShadingMode::Ambient);
        assert!(!s1.normal_map);

        let s2 = s1.apply_input(&held, &held);
        assert_eq!(s2, s1);

        let s3 = s2.apply_input(&held, &released);
        assert_eq!(s3, s1);

        let s4 = s3.apply_input(&released, &held);
        assert_eq!(s4.shading_mode, ShadingMode::ObservedArea);
        assert!(s4.normal_map);
    }

    #[test]
    fn rotation_and_render_mode_toggle_on_press() {
        let released = InputState::default();
        let pressed = InputState {
            toggle_rotation: true,
            cycle_render_mode: true,
            ..Default::default()
        };
        let s = RenderSettings::default().apply_input(&released, &pressed);
        assert!(s.rotate);
        assert_eq!(s.render_mode, RenderMode::Buffer);
    }
}
