//! easel demo
//!
//! Drives the engine from a macroquad window: assets are loaded one per
//! frame while the loading screen is up, mouse and keyboard are forwarded,
//! and each frame's elapsed time goes to `Engine::on_tick`.

mod demo;

use easel::asset::AssetKind;
use easel::config::EngineConfig;
use easel::engine::Engine;
use easel::input::{KeyEvent, PointerEvent};
use easel::render::MacroquadSurface;
use easel::VERSION;
use macroquad::prelude::*;

const CONFIG_PATH: &str = "easel.ron";

fn window_conf() -> Conf {
    let window = EngineConfig::load_or_default(CONFIG_PATH).window;
    Conf {
        window_title: format!("{} v{}", window.title, VERSION),
        window_width: window.width as i32,
        window_height: window.height as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Fire-and-poll loading: at most one pending asset per frame.
async fn load_next_asset(engine: &mut Engine, surface: &mut MacroquadSurface) {
    let Some((id, entry)) = engine.assets().next_pending() else {
        return;
    };
    let kind = entry.kind;
    let location = entry.location.clone();

    match kind {
        AssetKind::Image => match load_texture(&location).await {
            Ok(texture) => {
                texture.set_filter(FilterMode::Nearest);
                surface.insert_texture(id, texture);
                engine.assets_mut().mark_loaded(id);
            }
            Err(e) => engine.assets_mut().mark_failed(id, e.to_string()),
        },
        // Playback is not handled here; only completion matters
        AssetKind::Sound => match load_file(&location).await {
            Ok(_) => engine.assets_mut().mark_loaded(id),
            Err(e) => engine.assets_mut().mark_failed(id, e.to_string()),
        },
    }
}

fn forward_pointer(engine: &mut Engine, event: PointerEvent) {
    if let Err(e) = engine.on_pointer(event) {
        log::warn!("pointer event failed: {}", e);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = EngineConfig::load_or_default(CONFIG_PATH);
    let mut engine = Engine::new(config);

    // The demo steers the camera with the arrow keys
    engine.settings.accept_key_events.set(true);
    engine
        .settings
        .muted
        .subscribe(|_, muted| log::info!("sound {}", if *muted { "off" } else { "on" }));

    let hero = engine.assets_mut().register_image("assets/hero.png");
    engine.assets_mut().register_sound("assets/theme.ogg");

    let main_world = demo::build_world(&engine, hero);
    engine.begin_loading(main_world);
    engine.start();

    let mut surface = MacroquadSurface::new();

    loop {
        load_next_asset(&mut engine, &mut surface).await;

        engine.resize(screen_width() as u32, screen_height() as u32);

        let (mx, my) = mouse_position();
        let (mx, my) = (mx as f64, my as f64);
        if is_mouse_button_pressed(MouseButton::Left) {
            forward_pointer(&mut engine, PointerEvent::press(mx, my));
        }
        if is_mouse_button_released(MouseButton::Left) {
            forward_pointer(&mut engine, PointerEvent::release(mx, my));
            forward_pointer(&mut engine, PointerEvent::click(mx, my));
        }

        for key in get_keys_pressed() {
            if key == KeyCode::P {
                if engine.run_state().paused {
                    engine.resume();
                } else {
                    engine.pause();
                }
                continue;
            }
            engine.on_key(&KeyEvent::down(format!("{:?}", key)));
        }
        for key in get_keys_released() {
            engine.on_key(&KeyEvent::up(format!("{:?}", key)));
        }

        clear_background(BLACK);
        if let Err(e) = engine.on_tick(get_frame_time() as f64, &mut surface) {
            log::error!("frame failed: {}", e);
            break;
        }

        next_frame().await;
    }
}
