use std::{path::PathBuf, time::Instant};

use deskscene::{
    abs::{GlTextures, ShaderProgram},
    camera::Camera,
    scene::DeskScene,
    shapes::ShapeMeshes,
};
use glam::Vec2;
use glow::HasContext;
use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
};

use crate::{
    abs::App,
    config::ClientConfig,
    input::{KeyboardState, MouseState},
};

mod abs;
mod config;
mod input;
mod logging;

macro_rules! shader_program {
    ($name:ident, $gl:expr) => {
        ShaderProgram::from_sources(
            &$gl,
            include_str!(concat!("render/shaders/", stringify!($name), "/vert.glsl")),
            include_str!(concat!("render/shaders/", stringify!($name), "/frag.glsl")),
        )
    };
}

fn main() {
    let config_path = ClientConfig::locate(std::env::args_os().nth(1).map(PathBuf::from));
    let config = match ClientConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid config: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = logging::init(&config.log_level) {
        eprintln!("Could not install logger: {err}");
    }
    if let Some(path) = &config_path {
        log::debug!("Config path {}", path.display());
    }

    if let Err(err) = run(&config) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(config: &ClientConfig) -> Result<(), String> {
    let mut app = App::new(&config.title, config.width, config.height, config.fullscreen)?;

    unsafe {
        app.gl.enable(glow::DEPTH_TEST);
        app.gl.enable(glow::CULL_FACE);
        app.gl.cull_face(glow::BACK);
        app.gl.front_face(glow::CCW);
        app.gl.clear_color(0.05, 0.05, 0.07, 1.0);
    }

    let mut shader_program = shader_program!(scene, app.gl)?;
    let mut textures = GlTextures::new(&app.gl);
    let mut meshes = ShapeMeshes::new(&app.gl);
    let mut scene = DeskScene::new();
    scene
        .prepare(&mut textures, &mut meshes, &config.texture_dir)
        .map_err(|e| e.to_string())?;

    let mut camera = Camera::new(&config.camera);
    let mut keyboard_state = KeyboardState::default();
    let mut mouse_state = MouseState::default();
    app.sdl.mouse().set_relative_mouse_mode(true);

    let mut last_frame_time = Instant::now();

    'running: loop {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        keyboard_state.start_frame();
        mouse_state.start_frame();

        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::Window {
                    win_event: WindowEvent::Resized(width, height),
                    ..
                } => unsafe {
                    app.gl.viewport(0, 0, width, height);
                },
                Event::MouseMotion { xrel, yrel, .. } => {
                    mouse_state.delta += Vec2::new(xrel as f32, yrel as f32);
                }
                Event::MouseWheel { x, y, .. } => {
                    mouse_state.scroll_delta += Vec2::new(x as f32, y as f32);
                }
                Event::KeyDown {
                    keycode: Some(keycode),
                    repeat: false,
                    ..
                } => {
                    keyboard_state.down.insert(keycode);
                    keyboard_state.pressed.insert(keycode);
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => {
                    keyboard_state.down.remove(&keycode);
                }
                _ => {}
            }
        }

        input::drive_camera(&mut camera, &keyboard_state, &mouse_state, delta_time);

        unsafe {
            app.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        shader_program.use_program();
        scene
            .context(&mut shader_program)
            .set_camera(&camera, app.aspect_ratio());
        scene.render_frame(&mut shader_program, &meshes);

        app.window.gl_swap_window();
    }

    scene.destroy(&mut textures);
    log::info!("Closed");
    Ok(())
}
