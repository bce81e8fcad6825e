//! Arena Survivor entry point
//!
//! Browser builds drive the simulation from `requestAnimationFrame` and draw with
//! Canvas 2D. Native builds run a headless session from the command line.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use arena_survivor::renderer::{DrawCmd, build_frame};
    use arena_survivor::sim::{GameEvent, GamePhase, GameState, SessionSummary, TickInput, tick};
    use arena_survivor::{GameConfig, Viewport};

    /// Shell-side state wrapped around the one live session
    struct Game {
        state: GameState,
        input: TickInput,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_time: Option<f64>,
        loop_running: bool,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            let dt = self.last_time.map(|last| (time - last) as f32).unwrap_or(0.0);
            self.last_time = Some(time);
            tick(&mut self.state, &self.input, dt);
        }

        fn render(&self) {
            let ctx = &self.ctx;
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;

            for cmd in build_frame(&self.state).commands {
                match cmd {
                    DrawCmd::Clear { color } => {
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.fill_rect(0.0, 0.0, w, h);
                    }
                    DrawCmd::Line {
                        from,
                        to,
                        width,
                        color,
                    } => {
                        ctx.set_stroke_style_str(&color.to_css());
                        ctx.set_line_width(width as f64);
                        ctx.begin_path();
                        ctx.move_to(from.x as f64, from.y as f64);
                        ctx.line_to(to.x as f64, to.y as f64);
                        ctx.stroke();
                    }
                    DrawCmd::Circle {
                        center,
                        radius,
                        color,
                    } => {
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.begin_path();
                        let _ = ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
                        ctx.fill();
                    }
                    DrawCmd::Ring {
                        center,
                        radius,
                        width,
                        color,
                    } => {
                        ctx.set_stroke_style_str(&color.to_css());
                        ctx.set_line_width(width as f64);
                        ctx.begin_path();
                        let _ = ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
                        ctx.stroke();
                    }
                    DrawCmd::Triangle { points, color } => {
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.begin_path();
                        ctx.move_to(points[0].x as f64, points[0].y as f64);
                        ctx.line_to(points[1].x as f64, points[1].y as f64);
                        ctx.line_to(points[2].x as f64, points[2].y as f64);
                        ctx.close_path();
                        ctx.fill();
                    }
                    DrawCmd::Rect {
                        origin,
                        size,
                        color,
                    } => {
                        ctx.set_fill_style_str(&color.to_css());
                        ctx.fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
                    }
                }
            }
        }

        /// Push HUD text into the DOM
        fn update_hud(&self) {
            let Some(document) = document() else { return };
            let hud = &self.state.hud;

            if let Some(el) = element::<HtmlElement>(&document, "healthFill") {
                let pct = format!("{}%", hud.health_fraction() * 100.0);
                let _ = el.style().set_property("width", &pct);
            }
            set_text(&document, "healthText", &hud.health_text());
            set_text(&document, "timer", &hud.timer_text());
            set_text(
                &document,
                "score",
                &format!("Score: {} (Kills: {})", hud.score, hud.kills),
            );
        }

        fn start(&mut self) {
            self.state.reseed(js_sys::Date::now() as u64);
            self.state.start_session();
            log::info!("Session started with seed {}", self.state.seed());
            self.input = TickInput::default();
            self.last_time = None;
            show_play_screen();
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn set_canvas_visible(document: &Document, visible: bool) {
        if let Some(canvas) = element::<HtmlElement>(document, "gameCanvas") {
            let display = if visible { "block" } else { "none" };
            let _ = canvas.style().set_property("display", display);
        }
    }

    fn show_start_screen() {
        let Some(document) = document() else { return };
        set_hidden(&document, "startScreen", false);
        set_hidden(&document, "gameOverScreen", true);
        set_canvas_visible(&document, false);
    }

    fn show_play_screen() {
        let Some(document) = document() else { return };
        set_hidden(&document, "startScreen", true);
        set_hidden(&document, "gameOverScreen", true);
        set_canvas_visible(&document, true);
    }

    fn show_game_over(summary: &SessionSummary) {
        let Some(document) = document() else { return };
        set_text(&document, "finalScore", &format!("Final score: {}", summary.score));
        set_text(
            &document,
            "finalTime",
            &format!("Survived: {}s", summary.survival_secs),
        );
        set_text(&document, "coinsEarned", &format!("Coins earned: {}", summary.coins));
        set_hidden(&document, "gameOverScreen", false);
    }

    /// Match the canvas to the window and let the session remap entities
    fn fit_canvas(game: &mut Game) {
        let Some(window) = web_sys::window() else { return };
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1920.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1080.0);
        game.canvas.set_width(width as u32);
        game.canvas.set_height(height as u32);
        game.state.resize(width as f32, height as f32);
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Arena Survivor starting...");

        let document = document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = element(&document, "gameCanvas").ok_or("no canvas")?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, GameConfig::default(), Viewport::default());
        let game = Rc::new(RefCell::new(Game {
            state,
            input: TickInput::default(),
            canvas: canvas.clone(),
            ctx,
            last_time: None,
            loop_running: false,
        }));
        fit_canvas(&mut game.borrow_mut());

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_resize(game.clone());

        show_start_screen();
        log::info!("Arena Survivor ready");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Movement keys
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "w" | "arrowup" => g.input.up = pressed,
                    "s" | "arrowdown" => g.input.down = pressed,
                    "a" | "arrowleft" => g.input.left = pressed,
                    "d" | "arrowright" => g.input.right = pressed,
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer position in canvas pixels
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let mut g = game.borrow_mut();
                g.input.pointer.x = event.client_x() as f32 - rect.left() as f32;
                g.input.pointer.y = event.client_y() as f32 - rect.top() as f32;
            });
            let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Fire while held
        for (event_name, held) in [("mousedown", true), ("mouseup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.fire = held;
            });
            let _ = canvas.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };

        for id in ["startBtn", "restartBtn"] {
            let game = game.clone();
            on_click(&document, id, move || {
                game.borrow_mut().start();
                ensure_loop(game.clone());
            });
        }

        {
            let game = game.clone();
            on_click(&document, "mainMenuBtn", move || {
                game.borrow_mut().state.return_to_menu();
                show_start_screen();
            });
        }

        // Not built yet
        for (id, screen) in [
            ("collectionBtn", "collection"),
            ("shopBtn", "shop"),
            ("infoBtn", "info"),
        ] {
            on_click(&document, id, move || {
                log::info!("{} screen is not available yet", screen);
            });
        }
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        // Runs between animation frames, so never inside a tick
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&mut game.borrow_mut());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn ensure_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_running {
                return;
            }
            g.loop_running = true;
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();

            for event in &g.state.events {
                if let GameEvent::SessionEnded(summary) = event {
                    show_game_over(summary);
                }
            }

            let playing = g.state.phase == GamePhase::Playing;
            if !playing {
                g.loop_running = false;
            }
            playing
        };

        if keep_running {
            request_animation_frame(game);
        }
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

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use glam::Vec2;

    use arena_survivor::sim::{GamePhase, GameState, TickInput, tick};
    use arena_survivor::{GameConfig, Viewport};

    /// Run one Arena Survivor session without a window
    #[derive(Parser, Debug)]
    #[command(name = "arena-survivor", version, about)]
    pub struct Cli {
        /// Spawner seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Arena width in pixels
        #[arg(long, default_value_t = 1920.0)]
        width: f32,
        /// Arena height in pixels
        #[arg(long, default_value_t = 1080.0)]
        height: f32,
        /// Milliseconds per simulated frame
        #[arg(long, default_value_t = 16.0)]
        frame_ms: f32,
        /// Stop after this many frames even if the session is still running
        #[arg(long)]
        max_frames: Option<u64>,
        /// JSON gameplay config (missing fields use defaults)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Let a simple bot play instead of idling
        #[arg(long)]
        autopilot: bool,
        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,
    }

    pub fn run(cli: Cli) -> Result<()> {
        anyhow::ensure!(cli.frame_ms > 0.0, "--frame-ms must be positive");

        let config = match &cli.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                GameConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))?
            }
            None => GameConfig::default(),
        };

        let frame_budget = (config.session.duration_ms / cli.frame_ms as f64).ceil() as u64 + 1;
        let max_frames = cli.max_frames.unwrap_or(frame_budget);

        let mut state = GameState::new(cli.seed, config, Viewport::new(cli.width, cli.height));
        state.start_session();
        log::info!("Session started with seed {}", state.seed());

        let mut frames = 0;
        while state.phase == GamePhase::Playing && frames < max_frames {
            let input = if cli.autopilot {
                autopilot_input(&state)
            } else {
                TickInput::default()
            };
            tick(&mut state, &input, cli.frame_ms);
            frames += 1;

            if frames % 600 == 0 {
                log::info!(
                    "frame {}: {} left, score {}, enemies {}, health {}",
                    frames,
                    state.hud.timer_text(),
                    state.score,
                    state.enemies.len(),
                    state.hud.health
                );
            }
        }

        match state.summary {
            Some(summary) if cli.json => println!("{}", serde_json::to_string_pretty(&summary)?),
            Some(summary) => println!(
                "{:?}: score {}, kills {}, survived {}s, coins {}",
                summary.reason, summary.score, summary.kills, summary.survival_secs, summary.coins
            ),
            None => println!(
                "Stopped after {} frames: score {}, kills {}, {} remaining",
                frames,
                state.score,
                state.kills,
                state.hud.timer_text()
            ),
        }
        Ok(())
    }

    /// Aim at the nearest enemy, keep firing, back away when it gets close
    fn autopilot_input(state: &GameState) -> TickInput {
        let Some(player) = &state.player else {
            return TickInput::default();
        };
        let nearest = state
            .enemies
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player.pos)
                    .total_cmp(&b.pos.distance_squared(player.pos))
            });

        let Some(enemy) = nearest else {
            return TickInput {
                pointer: player.pos + Vec2::X,
                ..Default::default()
            };
        };

        let danger = 250.0 * state.scale();
        let away = player.pos - enemy.pos;
        let flee = away.length() < danger;
        // Drift back toward the middle when there is room
        let steer = if flee { away } else { state.viewport.center() - player.pos };
        let dead_zone = 10.0 * state.scale();

        TickInput {
            up: steer.y < -dead_zone,
            down: steer.y > dead_zone,
            left: steer.x < -dead_zone,
            right: steer.x > dead_zone,
            pointer: enemy.pos,
            fire: true,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Arena Survivor (headless) starting...");
    native::run(native::Cli::parse())
}
