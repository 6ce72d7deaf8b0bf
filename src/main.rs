//! Neon Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement};

    use neon_breakout::audio::AudioManager;
    use neon_breakout::consts::{DEATH_CUE_DURATION_MS, SIM_DT};
    use neon_breakout::input::Direction;
    use neon_breakout::persistence::LocalStorage;
    use neon_breakout::platform::{DeviceProfile, is_supported_device, now_ms};
    use neon_breakout::renderer::{RenderState, build_frame};
    use neon_breakout::sim::{AudioCue, GameEvent, UiEvent};
    use neon_breakout::{Game, LoopControl, Settings, Tuning};

    /// Everything the browser callbacks share
    struct App {
        game: Game<LocalStorage>,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        document: Document,
        last_time: f64,
        loop_scheduled: bool,
    }

    impl App {
        /// Apply queued events to the page and the speakers. Returns true
        /// when the death cue just started.
        fn flush(&mut self) -> bool {
            let mut death_cue_started = false;
            for event in self.game.drain_events() {
                match event {
                    GameEvent::Audio(cue) => {
                        death_cue_started |= cue == AudioCue::DeathCuePlay;
                        self.audio.handle(cue, now_ms());
                    }
                    GameEvent::Ui(ui) => apply_ui(&self.document, ui),
                }
            }
            death_cue_started
        }

        /// Render the current frame
        fn render(&mut self) {
            let glow = self.settings.neon_glow;
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_frame(self.game.state(), glow);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let logical = render_state.logical_size;
                        render_state.resize(w, h, logical);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn resize_to(&mut self, canvas: &HtmlCanvasElement) {
            let (width, height, logical) = measure_canvas(canvas);
            self.game.resize(logical.0, logical.1);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height, logical);
            }
        }
    }

    /// Backing size in device pixels plus the CSS size
    fn measure_canvas(canvas: &HtmlCanvasElement) -> (u32, u32, (f32, f32)) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height, (client_w as f32, client_h as f32))
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(document: &Document, id: &str, display: &str) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }

    /// Retitle the overlay menu and show it
    fn show_overlay(document: &Document, title: &str, button: &str, instructions: Option<&str>) {
        if let Some(el) = document.query_selector("#overlay .menu h1").ok().flatten() {
            el.set_text_content(Some(title));
        }
        set_text(document, "startGame", button);
        if let Some(html) = instructions {
            if let Some(el) = document.query_selector("#overlay .menu .instructions").ok().flatten() {
                el.set_inner_html(html);
            }
        }
        set_display(document, "overlay", "flex");
    }

    fn apply_ui(document: &Document, event: UiEvent) {
        match event {
            UiEvent::ScoreChanged(score) => set_text(document, "score", &score.to_string()),
            UiEvent::LivesChanged(lives) => set_text(document, "lives", &lives.to_string()),
            UiEvent::HighScoreChanged(best) => set_text(document, "highScore", &best.to_string()),
            UiEvent::ShowPaused => show_overlay(document, "GAME PAUSED", "Resume Game", None),
            UiEvent::ShowLifeLost => show_overlay(document, "YOU LOST A LIFE", "Continue", Some("")),
            UiEvent::ShowGameOver {
                final_score,
                high_score,
            } => show_overlay(
                document,
                "GAME OVER",
                "Play Again",
                Some(&format!(
                    "<p>Final Score: {final_score}</p><p>High Score: {high_score}</p>"
                )),
            ),
            UiEvent::HideOverlay => set_display(document, "overlay", "none"),
            UiEvent::ControlHighlighted { direction, active } => {
                let key = match direction {
                    Direction::Left => "KeyA",
                    Direction::Right => "KeyD",
                };
                let selector = format!(".control-btn[data-key=\"{key}\"]");
                if let Some(el) = document.query_selector(&selector).ok().flatten() {
                    let classes = el.class_list();
                    let _ = if active {
                        classes.add_1("active")
                    } else {
                        classes.remove_1("active")
                    };
                }
            }
        }
    }

    /// Push queued events out and start the loop if the game just began
    fn after_event(app: &Rc<RefCell<App>>) {
        let death_cue_started = app.borrow_mut().flush();
        if death_cue_started {
            schedule_death_cue_cut(app.clone());
        }
        ensure_loop(app);
    }

    fn schedule_death_cue_cut(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            app.borrow_mut().audio.update(now_ms());
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            DEATH_CUE_DURATION_MS as i32,
        );
        closure.forget();
    }

    fn ensure_loop(app: &Rc<RefCell<App>>) {
        let mut a = app.borrow_mut();
        if a.game.is_running() && !a.loop_scheduled {
            a.loop_scheduled = true;
            a.last_time = 0.0;
            drop(a);
            request_animation_frame(app.clone());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Neon Breakout starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        if let Some(profile) = DeviceProfile::detect() {
            if !is_supported_device(&profile) {
                log::info!("Handheld device detected, not starting");
                set_display(&document, "mobileOverlay", "flex");
                return;
            }
        }

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };
        let (width, height, logical) = measure_canvas(&canvas);

        let storage = LocalStorage;
        let settings = Settings::load(&storage);
        let tuning = Tuning::default();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(tuning, storage, seed, logical.0, logical.1);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let render_state = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                match instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await
                {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        RenderState::new(surface, &adapter, width, height, logical)
                            .await
                            .map_err(|e| log::error!("Renderer unavailable: {e}"))
                            .ok()
                    }
                    Err(e) => {
                        log::error!("No GPU adapter: {e}");
                        None
                    }
                }
            }
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                None
            }
        };

        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            audio: AudioManager::new(&settings),
            settings,
            document: document.clone(),
            last_time: 0.0,
            loop_scheduled: false,
        }));

        setup_input_handlers(app.clone());
        setup_start_button(app.clone());
        setup_auto_pause(app.clone());
        setup_resize(&canvas, app.clone());

        {
            let mut a = app.borrow_mut();
            a.flush();
            a.render();
        }

        log::info!("Neon Breakout ready, press Space to start");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let code = event.code();
                if code == "Space" {
                    // Keep the page from scrolling
                    event.prevent_default();
                }
                app.borrow_mut().game.key_down(&code);
                after_event(&app);
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.code());
                after_event(&app);
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(app: Rc<RefCell<App>>) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("startGame"))
        else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().game.start();
            after_event(&app);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            app.borrow_mut().game.focus_lost();
            after_event(&app);
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
            let mut a = app.borrow_mut();
            a.resize_to(&canvas);
            // The loop may be stopped, so draw the rebuilt layout now
            a.render();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let (control, death_cue_started) = {
            let mut a = app.borrow_mut();
            a.loop_scheduled = false;

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            let control = a.game.frame(dt);
            let death_cue_started = a.flush();
            a.render();
            (control, death_cue_started)
        };

        if death_cue_started {
            schedule_death_cue_cut(app.clone());
        }
        if control == LoopControl::Continue {
            ensure_loop(&app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Frames simulated by the headless runner before it gives up
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_MAX_FRAMES: u32 = 60 * 60 * 10;

/// Headless demo: the autopilot plays one game to the end and the best score
/// is kept next to the executable.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_breakout::audio::AudioManager;
    use neon_breakout::consts::SIM_DT;
    use neon_breakout::persistence::FileStorage;
    use neon_breakout::sim::{GameEvent, GamePhase};
    use neon_breakout::{Game, LoopControl, Settings, Tuning};

    env_logger::init();
    log::info!("Neon Breakout (native) starting...");
    log::info!("Native mode runs a headless autoplay demo - use the web build to play");

    let storage = FileStorage::beside_executable();
    let tuning = match std::fs::read_to_string(storage.dir().join("tuning.json")) {
        Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning.json: {e}");
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    };

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let settings = Settings::load(&storage);
    let mut audio = AudioManager::new(&settings);
    let width = tuning.reference_width;
    let height = tuning.reference_height;
    let mut game = Game::new(tuning, storage, seed, width, height);
    game.set_autopilot(true);
    game.start();

    let mut now_ms = 0.0;
    for _ in 0..HEADLESS_MAX_FRAMES {
        let control = game.frame(SIM_DT);
        now_ms += f64::from(SIM_DT) * 1000.0;

        for event in game.drain_events() {
            match event {
                GameEvent::Audio(cue) => audio.handle(cue, now_ms),
                GameEvent::Ui(ui) => log::debug!("{:?}", ui),
            }
        }
        audio.update(now_ms);

        if control == LoopControl::Stop {
            if game.phase() == GamePhase::GameOver {
                break;
            }
            game.start();
        }
    }

    let state = game.state();
    println!(
        "seed {}: score {}, level {}, lives {}, best {}",
        seed,
        state.board.score,
        state.level,
        state.board.lives,
        game.high_score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
