//! Hungry Mac entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use hungry_mac::audio::AudioManager;
    use hungry_mac::consts::*;
    use hungry_mac::input::KeyState;
    use hungry_mac::renderer::{RenderState, SpriteBatch};
    use hungry_mac::{App, GameConfig, Settings};

    /// Game instance holding all state
    struct Game {
        app: App,
        batch: SpriteBatch,
        audio: AudioManager,
        settings: Settings,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        keys: KeyState,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.app.update(&self.keys, &mut self.audio);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.batch.clear();
            self.app.draw(&mut self.batch);
            let vertices = self.batch.vertices();

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hungry Mac starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let element = document.get_element_by_id("canvas").expect("no canvas");

        // Optional JSON overrides on the canvas: <canvas data-config='{...}'>
        let config = match element.get_attribute("data-config") {
            Some(json) => match GameConfig::from_json(&json) {
                Ok(config) => {
                    log::info!("Using config from the canvas data-config attribute");
                    config
                }
                Err(e) => {
                    log::error!("Invalid config: {}", e);
                    return;
                }
            },
            None => GameConfig::default(),
        };

        let canvas: HtmlCanvasElement = element.dyn_into().expect("not a canvas");
        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        // Canvas matches the game area, scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (config.width as f64 * dpr) as u32;
        let height = (config.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let app = match App::new(config.clone(), seed) {
            Ok(app) => app,
            Err(e) => {
                log::error!("Invalid config: {}", e);
                return;
            }
        };
        log::info!("Game initialized with seed: {}", seed);

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game {
            app,
            batch: SpriteBatch::new(config.width, config.height, config.tile_size),
            audio: AudioManager::new(&settings),
            settings,
            render_state: None,
            accumulator: 0.0,
            last_time: 0.0,
            keys: KeyState::default(),
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, &config).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Hungry Mac running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down/up track the held level; clean presses are detected by the app
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        let mut g = game.borrow_mut();
                        g.keys.space = true;
                        g.audio.resume();
                    }
                    "m" | "M" if !event.repeat() => {
                        let mut g = game.borrow_mut();
                        let muted = g.settings.toggle_mute();
                        g.settings.save();
                        let settings = g.settings.clone();
                        g.audio.apply_settings(&settings);
                        log::info!("Sound {}", if muted { "muted" } else { "on" });
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == " " {
                    game.borrow_mut().keys.space = false;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: a key released while unfocused never sends keyup
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.keys = KeyState::default();
                if g.settings.mute_on_blur {
                    let muted = Settings {
                        muted: true,
                        ..g.settings.clone()
                    };
                    g.audio.apply_settings(&muted);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let settings = g.settings.clone();
                g.audio.apply_settings(&settings);
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hungry_mac::audio::LogAudio;
    use hungry_mac::input::TapScript;
    use hungry_mac::renderer::SpriteBatch;
    use hungry_mac::{App, GameConfig};

    env_logger::init();
    log::info!("Hungry Mac (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    let frames: u64 = std::env::var("HUNGRY_MAC_FRAMES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60 * 60);
    // Space taps stand in for a keyboard so menu and game over screens advance
    let taps = TapScript::every(
        std::env::var("HUNGRY_MAC_TAP_EVERY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(120),
    );

    let mut app = match App::new(config.clone(), seed) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(1);
        }
    };

    let mut batch = SpriteBatch::new(config.width, config.height, config.tile_size);
    let mut audio = LogAudio::default();
    let start_grass = app.world().grass().len();

    for frame in 0..frames {
        let keys = taps.map(|t| t.keys_at(frame)).unwrap_or_default();
        app.update(&keys, &mut audio);
        batch.clear();
        app.draw(&mut batch);
    }

    println!(
        "seed {}: {} frames, ended in {:?}, grass {} -> {}, {} bite(s), {} vertices in last frame",
        seed,
        frames,
        app.state,
        start_grass,
        app.world().grass().len(),
        audio.played,
        batch.vertices().len()
    );
}
