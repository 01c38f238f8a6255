//! Super Surfers entry point
//!
//! In the browser this runs the canvas game loop. Natively it runs a headless
//! autopilot session and prints the final stats.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use super_surfers::audio::{WebAudio, route_events};
    use super_surfers::consts::*;
    use super_surfers::hud::{FinalText, HudText};
    use super_surfers::input::{key_command, touch_command};
    use super_surfers::renderer::CanvasRenderer;
    use super_surfers::sim::{Command, GameEvent, GamePhase, GameSession, Stats, TickInput, tick};
    use super_surfers::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        renderer: Option<CanvasRenderer>,
        audio: WebAudio,
        settings: Settings,
        document: Document,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings, document: Document) -> Self {
            let mut session = GameSession::new(seed, tuning);
            session.apply_settings(&settings);
            Self {
                session,
                renderer: None,
                audio: WebAudio::new(&settings),
                settings,
                document,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Queue a command for the next tick
        fn push(&mut self, command: Command) {
            self.input.commands.push(command);
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.session, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Commands are one-shot
                self.input.commands.clear();
            }

            self.present_events();
        }

        /// Route drained events to audio, screens and HUD
        fn present_events(&mut self) {
            let events = self.session.drain_events();
            if events.is_empty() {
                return;
            }
            route_events(&events, &mut self.audio);

            for event in &events {
                match event {
                    GameEvent::StateChanged(phase) => self.show_screens(*phase),
                    GameEvent::EnvironmentChanged(env) => {
                        log::info!("Environment: {}", env.name());
                    }
                    GameEvent::PlaySound(_)
                    | GameEvent::SpawnParticles { .. }
                    | GameEvent::StatsUpdated(_) => {}
                }
            }

            // Only the newest snapshot matters
            let latest = events.iter().rev().find_map(|e| match e {
                GameEvent::StatsUpdated(stats) => Some(stats),
                _ => None,
            });
            if let Some(stats) = latest {
                self.update_hud(stats);
            }
        }

        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                if let Err(e) = renderer.render(&self.session) {
                    log::warn!("Render error: {:?}", e);
                }
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        }

        /// Show exactly the overlay matching the phase
        fn show_screens(&self, phase: GamePhase) {
            self.set_hidden("startScreen", phase != GamePhase::Menu);
            self.set_hidden("pauseScreen", phase != GamePhase::Paused);
            self.set_hidden("gameOverScreen", phase != GamePhase::GameOver);

            if phase == GamePhase::GameOver {
                let text = FinalText::from_stats(&self.session.stats());
                self.set_text("finalScore", &text.score);
                self.set_text("finalDistance", &text.distance);
                self.set_text("maxCombo", &text.max_combo);
                self.set_text("powerUpsUsed", &text.power_ups_used);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, stats: &Stats) {
            let hud = HudText::from_stats(stats);
            self.set_text("score", &hud.score);
            self.set_text("distance", &hud.distance);
            self.set_text("combo", &hud.combo);
            self.set_text("speed", &hud.speed);

            for (id, active, secs) in &hud.power_ups {
                let Some(el) = self.document.get_element_by_id(id) else {
                    continue;
                };
                let _ = el.set_attribute("data-active", if *active { "true" } else { "false" });
                if *active {
                    if let Some(timer) = el.query_selector(".power-up-timer").ok().flatten() {
                        timer.set_text_content(Some(secs));
                    }
                }
            }
        }
    }

    /// Optional tuning JSON embedded in the page
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring page tuning: {}", e);
                Tuning::default()
            }
        }
    }

    /// Optional presentation settings embedded in the page
    fn load_settings(document: &Document) -> Settings {
        let Some(json) = document
            .get_element_by_id("settings")
            .and_then(|el| el.text_content())
        else {
            return Settings::default();
        };
        Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring page settings: {}", e);
            Settings::default()
        })
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Super Surfers starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store in device pixels
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        if width > 0 && height > 0 {
            canvas.set_width(width);
            canvas.set_height(height);
        }

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let settings = load_settings(&document);
        log::info!("Quality preset: {}", settings.quality.as_str());
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            tuning,
            settings,
            document.clone(),
        )));
        {
            let mut g = game.borrow_mut();
            g.renderer = Some(CanvasRenderer::new(&canvas)?);
            g.show_screens(GamePhase::Menu);
        }
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, &canvas, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_auto_pause(&window, &document, game.clone())?;

        request_animation_frame(game);

        log::info!("Super Surfers running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                if code == "KeyI" {
                    g.input.autopilot = !g.input.autopilot;
                    log::info!("Autopilot: {}", g.input.autopilot);
                    return;
                }
                if let Some(command) = key_command(&code, g.session.phase) {
                    // Keep Space and arrows from scrolling the page
                    event.prevent_default();
                    g.audio.resume();
                    g.push(command);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch zones
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let rect = canvas_clone.get_bounding_client_rect();
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return;
                }
                let x = ((touch.client_x() as f64 - rect.left()) / rect.width()) as f32;
                let y = ((touch.client_y() as f64 - rect.top()) / rect.height()) as f32;

                let mut g = game.borrow_mut();
                if let Some(command) = touch_command(x, y, g.session.phase) {
                    g.push(command);
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let buttons = [
            ("startBtn", Command::Start),
            ("restartBtn", Command::Start),
            ("menuBtn", Command::ShowMenu),
            ("resumeBtn", Command::Resume),
            ("restartFromPauseBtn", Command::Restart),
            ("menuFromPauseBtn", Command::ShowMenu),
        ];

        for (id, command) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                // Audio may only start after a user gesture
                g.audio.resume();
                g.push(command);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_auto_pause(
        window: &web_sys::Window,
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() != web_sys::VisibilityState::Hidden {
                    return;
                }
                let mut g = game.borrow_mut();
                if g.settings.pause_on_blur && g.session.phase == GamePhase::Playing {
                    g.push(Command::Pause);
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.pause_on_blur && g.session.phase == GamePhase::Playing {
                    g.push(Command::Pause);
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

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
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless autopilot run
#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "super-surfers")]
#[command(about = "Run a seeded autopilot session and print the final stats as JSON")]
struct Cli {
    /// Maximum ticks to simulate after the start command
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// Gameplay RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Tuning JSON file (defaults apply when omitted)
    #[arg(long)]
    tuning: Option<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &std::path::Path) -> Result<super_surfers::Tuning, String> {
    let json = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    super_surfers::Tuning::from_json(&json).map_err(|e| e.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use super_surfers::Tuning;
    use super_surfers::audio::{LogAudio, route_events};
    use super_surfers::consts::SIM_DT;
    use super_surfers::sim::{Command, GamePhase, GameSession, TickInput, tick};

    env_logger::init();

    let cli = Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => match load_tuning(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                eprintln!("Failed to load tuning from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Headless run: {} ticks, seed {}", cli.ticks, cli.seed);

    let mut session = GameSession::new(cli.seed, tuning);
    let mut audio = LogAudio::default();
    let autopilot = TickInput {
        autopilot: true,
        ..TickInput::default()
    };

    tick(&mut session, &TickInput::with(&[Command::Start]), SIM_DT);
    for _ in 0..cli.ticks {
        tick(&mut session, &autopilot, SIM_DT);
        route_events(&session.drain_events(), &mut audio);
        if session.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Finished after {} ticks ({:?}), {} sounds",
        session.time_ticks,
        session.phase,
        audio.played
    );
    match serde_json::to_string_pretty(&session.stats()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize stats: {}", e),
    }
}
