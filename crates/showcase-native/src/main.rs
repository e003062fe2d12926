use clap::Parser;
use showcase_core::{Clock, ControlResponse, SystemClock, Viewer};
use showcase_native::assets::{self, LoadedAssets};
use showcase_native::audio::NarrationPlayer;
use showcase_native::cli::Args;
use showcase_native::sim;
use showcase_render::GpuState;
use std::time::Duration;
use winit::{
    event::*,
    event_loop::EventLoop,
    window::{CursorIcon, WindowBuilder},
};

const SIM_WIDTH: u32 = 1280;
const SIM_HEIGHT: u32 = 720;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::builder().filter_level(args.log_level()).init();

    let config = args.showcase_config()?;
    log::info!("[init] showcase {:?}", config.name);

    if let Some(frames) = args.simulate_frames {
        let mut viewer = Viewer::new(config, SIM_WIDTH, SIM_HEIGHT);
        assets::load_all(&mut viewer, &args.assets, Duration::ZERO);
        sim::simulate(&mut viewer, Duration::ZERO, frames);
        return Ok(());
    }
    run_window(config, &args)
}

fn run_window(config: showcase_core::ShowcaseConfig, args: &Args) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(format!("Showcase: {}", config.name))
        .build(&event_loop)?;
    let window = &window;
    let size = window.inner_size();

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window)?;
    let mut gpu = pollster::block_on(GpuState::new(&instance, surface, size.width, size.height))?;

    let clock = SystemClock::new();
    let mut viewer = Viewer::new(config, size.width.max(1), size.height.max(1));
    let LoadedAssets {
        models,
        environment,
        narration,
    } = assets::load_all(&mut viewer, &args.assets, clock.now());
    for (key, model) in &models {
        gpu.attach_model(*key, model);
    }
    if let Some(faces) = &environment {
        gpu.set_environment(faces);
    }
    let narration = narration.and_then(NarrationPlayer::start);
    let respond = move |response: ControlResponse| {
        if response.play_narration {
            match &narration {
                Some(player) => player.play(),
                None => log::debug!("[audio] no narration to play"),
            }
        }
    };

    let mut cursor = (0.0f32, 0.0f32);
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                gpu.resize_if_needed(size.width, size.height);
                viewer.resize(size.width.max(1), size.height.max(1));
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                cursor = (position.x as f32, position.y as f32);
                viewer.pointer_move(cursor.0, cursor.1, gpu.size().1 as f32);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    let response = viewer.pointer_down(cursor.0, cursor.1, clock.now());
                    window.set_cursor_icon(CursorIcon::Grab);
                    respond(response);
                }
                ElementState::Released => {
                    viewer.pointer_up(clock.now());
                    window.set_cursor_icon(CursorIcon::Default);
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                // Scrolling up zooms in.
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                let response = viewer.wheel(dy, clock.now());
                respond(response);
            }
            _ => {}
        },
        Event::AboutToWait => {
            let snapshot = viewer.frame(clock.now());
            match gpu.render(&snapshot) {
                Ok(()) => window.request_redraw(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[frame] {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
