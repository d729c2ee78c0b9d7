use crate::error::RenderError;
use crate::io::config::Config;
use crate::scene::loader::build_renderer;
use crate::ui::input::InputPoller;
use log::{debug, info, warn};
use minifb::{Key, Window, WindowOptions};
use std::path::Path;
use std::time::Instant;

/// Runs the application in GUI mode with real-time rendering and interactivity.
pub fn run_gui(config: &Config) -> Result<(), RenderError> {
    let width = config.render.width;
    let height = config.render.height;

    let mut frame_count = 0;
    let mut last_fps_update = Instant::now();

    info!("Starting GUI mode ({}x{})...", width, height);
    info!(
        "Controls: WASD/Arrows=Move, LMB drag=Move, RMB drag=Look, LMB+RMB drag=Up/Down, \
         F4=Render Mode, F5=Rotation, F6=Normal Map, F7=Shading Mode, X=Screenshot"
    );

    // 1. Initialize Window
    let mut window = Window::new(
        "Software Rasterizer",
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| RenderError::Window(e.to_string()))?;

    window.set_target_fps(60);

    // 2. Initialize Resources
    let mut renderer = build_renderer(config);
    let mut poller = InputPoller::new();
    let mut last_frame_time = Instant::now();

    // 3. Main Loop
    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        // --- Input ---
        let input = poller.poll(&window);
        renderer.update(dt, &input);

        if window.is_key_pressed(Key::X, minifb::KeyRepeat::No) {
            match renderer.save_buffer_to_image(&config.render.output) {
                Ok(()) => info!("Screenshot saved to '{}'", config.render.output),
                Err(e) => warn!("{}", e),
            }
        }

        // --- Render ---
        let stats = renderer.render();

        // --- Display ---
        window
            .update_with_buffer(renderer.color_buffer(), width, height)
            .map_err(|e| RenderError::Window(e.to_string()))?;

        frame_count += 1;
        if last_fps_update.elapsed().as_secs_f32() >= 2.0 {
            info!(
                "Average FPS: {:.1}",
                frame_count as f32 / last_fps_update.elapsed().as_secs_f32()
            );
            debug!(
                "Last frame: {} triangles, {} culled, {} pixels",
                stats.triangles, stats.culled, stats.pixels
            );
            frame_count = 0;
            last_fps_update = Instant::now();
        }
    }

    Ok(())
}

/// Runs the application in CLI mode (headless): renders a single frame and saves it.
pub fn run_cli(config: &Config, output: &Path) -> Result<(), RenderError> {
    info!("Starting CLI mode...");
    let mut renderer = build_renderer(config);
    let start_time = Instant::now();

    let stats = renderer.render();
    info!(
        "Render completed in {:.2?} ({} triangles drawn, {} culled)",
        start_time.elapsed(),
        stats.drawn(),
        stats.culled
    );

    info!("Saving output to {:?}...", output);
    renderer.save_buffer_to_image(output)?;
    info!("Done.");
    Ok(())
}
