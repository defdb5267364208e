//! Browser glue: canvas lookup, DOM overlays, keyboard / button listeners and
//! the `requestAnimationFrame` loop that drives `Game::tick`.
//!
//! All state lives in one thread-local `App`; every callback borrows it for
//! the duration of a single event, so ordering stays strictly sequential.
//! Mounting only wires the page; nothing falls until a new game is begun
//! from the start control (or `start_game`).

pub mod render;

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, window};

use crate::config::GameConfig;
use crate::error::SetupError;
use crate::game::board::{COLS, ROWS};
use crate::game::spawner::Randomizer;
use crate::game::{Game, GameEvent};
use crate::input::Command;
use render::{PREVIEW_CELLS, Surface};

struct App {
    game: Game,
    config: GameConfig,
    doc: Document,
    board: Surface,
    preview: Surface,
    // false until the first start; input and frames are ignored before then
    started: bool,
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
    static FRAME: RefCell<Option<Closure<dyn FnMut(f64)>>> = RefCell::new(None);
    static LOOP_RUNNING: Cell<bool> = Cell::new(false);
    static KEYS_INSTALLED: Cell<bool> = Cell::new(false);
    // ids of buttons that already carry a click listener
    static WIRED_BUTTONS: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

/// Wires the page for `config`: canvases, HUD, overlay and listeners. Draws
/// the empty board but does not start play.
pub fn mount(config: GameConfig) -> Result<(), SetupError> {
    config.validate()?;
    let win = window().ok_or(SetupError::NoWindow)?;
    let doc = win.document().ok_or(SetupError::NoDocument)?;

    let board = surface(
        &doc,
        &config.board_canvas_id,
        COLS as f64 * config.block_size,
        ROWS as f64 * config.block_size,
        config.block_size,
    )?;
    let preview = surface(
        &doc,
        &config.preview_canvas_id,
        PREVIEW_CELLS as f64 * config.preview_block_size,
        PREVIEW_CELLS as f64 * config.preview_block_size,
        config.preview_block_size,
    )?;
    ensure_hud(&doc, &config)?;
    install_keys(&doc)?;
    wire_buttons(&doc, &config)?;

    let rng = match config.seed {
        Some(seed) => Randomizer::with_seed(seed),
        None => Randomizer::from_entropy(),
    };
    log::info!("mounted (seed {})", rng.seed());
    let game = Game::new(rng, config.drop_interval_ms);
    let mut app = App { game, config, doc, board, preview, started: false };
    app.show_overlay(false);
    app.game.drain_events();
    app.set_text(&app.config.score_id, "Score: 0");
    app.set_text(&app.config.lines_id, "Lines: 0");
    render::draw_idle(&app.board, &app.preview, &app.game);
    APP.with(|cell| cell.replace(Some(app)));
    Ok(())
}

/// Mounts with `config` and immediately begins a game.
pub fn start(config: GameConfig) -> Result<(), SetupError> {
    mount(config)?;
    begin_new_game();
    Ok(())
}

/// Resets and runs the game (start and restart controls). Mounts the
/// default layout first when nothing is mounted yet.
pub fn begin_new_game() {
    let mounted = APP.with(|cell| cell.borrow().is_some());
    if !mounted {
        if let Err(err) = mount(GameConfig::default()) {
            log::error!("cannot start game: {err}");
            return;
        }
    }
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            app.restart();
        }
    });
    ensure_loop();
}

pub fn toggle_pause() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            app.command(Command::TogglePause);
        }
    });
}

pub fn current_score() -> u32 {
    APP.with(|cell| cell.borrow().as_ref().map(|app| app.game.score()).unwrap_or(0))
}

/// True between a start and the following game over.
pub fn game_running() -> bool {
    APP.with(|cell| {
        cell.borrow()
            .as_ref()
            .is_some_and(|app| app.started && !app.game.is_game_over())
    })
}

impl App {
    fn restart(&mut self) {
        log::info!("new game");
        self.started = true;
        self.game.reset();
        self.show_overlay(false);
        self.sync();
        render::draw_frame(&self.board, &self.preview, &self.game);
    }

    /// One animation frame. Returns false once the loop should stop.
    fn frame(&mut self, ts: f64) -> bool {
        if !self.started {
            return false;
        }
        if self.game.tick(ts) {
            render::draw_frame(&self.board, &self.preview, &self.game);
        }
        self.sync();
        !self.game.is_game_over()
    }

    fn command(&mut self, cmd: Command) {
        if !self.started || self.game.is_game_over() {
            return;
        }
        self.game.apply(cmd);
        if self.game.is_paused() {
            if cmd == Command::TogglePause {
                render::draw_paused(&self.board);
            }
        } else {
            render::draw_frame(&self.board, &self.preview, &self.game);
        }
        self.sync();
    }

    /// Pushes pending game events out to the DOM.
    fn sync(&mut self) {
        for event in self.game.drain_events() {
            match event {
                GameEvent::ScoreChanged { score, lines } => {
                    self.set_text(&self.config.score_id, &format!("Score: {score}"));
                    self.set_text(&self.config.lines_id, &format!("Lines: {lines}"));
                }
                GameEvent::RowsCleared(swept) => {
                    log::info!("cleared {swept}");
                }
                GameEvent::GameOver { score } => {
                    self.set_text(&self.config.final_score_id, &score.to_string());
                    self.show_overlay(true);
                }
            }
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.doc.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show_overlay(&self, visible: bool) {
        let Some(el) = self.doc.get_element_by_id(&self.config.overlay_id) else {
            return;
        };
        if let Ok(el) = el.dyn_into::<HtmlElement>() {
            let display = if visible { "flex" } else { "none" };
            el.style().set_property("display", display).ok();
        }
    }
}

fn surface(
    doc: &Document,
    id: &str,
    width: f64,
    height: f64,
    block: f64,
) -> Result<Surface, SetupError> {
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(id) {
        el.dyn_into()
            .map_err(|_| SetupError::WrongElement(id.to_string(), "canvas"))?
    } else {
        let c: HtmlCanvasElement = doc
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| SetupError::WrongElement(id.to_string(), "canvas"))?;
        c.set_id(id);
        c.set_attribute("style", "margin:8px; border:2px solid #222; border-radius:6px; background:#111;")
            .ok();
        body(doc)?.append_child(&c)?;
        c
    };
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| SetupError::NoContext(id.to_string()))?
        .dyn_into()
        .map_err(|_| SetupError::NoContext(id.to_string()))?;
    Ok(Surface { canvas, ctx, block })
}

fn body(doc: &Document) -> Result<HtmlElement, SetupError> {
    doc.body().ok_or_else(|| SetupError::Dom("document has no body".into()))
}

/// Creates the score, lines and game-over elements when the host page lacks them.
fn ensure_hud(doc: &Document, config: &GameConfig) -> Result<(), SetupError> {
    for (id, text) in [(&config.score_id, "Score: 0"), (&config.lines_id, "Lines: 0")] {
        if doc.get_element_by_id(id).is_none() {
            let div = doc.create_element("div")?;
            div.set_id(id);
            div.set_text_content(Some(text));
            div.set_attribute("style", "font-family:'Fira Code', monospace; font-size:16px; margin:4px 8px; color:#ffd166;")
                .ok();
            body(doc)?.append_child(&div)?;
        }
    }
    if doc.get_element_by_id(&config.overlay_id).is_none() {
        let overlay = doc.create_element("div")?;
        overlay.set_id(&config.overlay_id);
        overlay.set_attribute("style", "position:fixed; inset:0; display:none; flex-direction:column; align-items:center; justify-content:center; background:rgba(0,0,0,0.6); color:#fff; font-family:'Fira Code', monospace; z-index:50;")
            .ok();
        overlay.set_inner_html(&format!(
            "<h2>GAME OVER</h2><p>Final score: <span id='{}'>0</span></p>",
            config.final_score_id
        ));
        if doc.get_element_by_id(&config.restart_button_id).is_none() {
            let button = doc.create_element("button")?;
            button.set_id(&config.restart_button_id);
            button.set_text_content(Some("Play again"));
            overlay.append_child(&button)?;
        }
        body(doc)?.append_child(&overlay)?;
    }
    Ok(())
}

fn install_keys(doc: &Document) -> Result<(), SetupError> {
    if KEYS_INSTALLED.with(|k| k.replace(true)) {
        return Ok(());
    }
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        let Some(cmd) = Command::from_key(&evt.key()) else {
            return;
        };
        evt.prevent_default();
        APP.with(|cell| {
            if let Some(app) = cell.borrow_mut().as_mut() {
                app.command(cmd);
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Start and restart both begin a fresh game. Each button id is wired once;
/// remounting with new ids wires the new buttons as well.
fn wire_buttons(doc: &Document, config: &GameConfig) -> Result<(), SetupError> {
    for id in [&config.start_button_id, &config.restart_button_id] {
        if WIRED_BUTTONS.with(|w| w.borrow().contains(id)) {
            continue;
        }
        let Some(button) = doc.get_element_by_id(id) else {
            log::debug!("no #{id} button on page");
            continue;
        };
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            begin_new_game();
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        WIRED_BUTTONS.with(|w| w.borrow_mut().push(id.clone()));
    }
    Ok(())
}

/// Schedules the frame loop unless it is already running.
fn ensure_loop() {
    if LOOP_RUNNING.with(|r| r.replace(true)) {
        return;
    }
    request_frame();
}

fn request_frame() {
    FRAME.with(|f| {
        if f.borrow().is_none() {
            *f.borrow_mut() = Some(Closure::wrap(Box::new(on_frame) as Box<dyn FnMut(f64)>));
        }
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    });
}

fn on_frame(ts: f64) {
    let keep_going = APP.with(|cell| match cell.borrow_mut().as_mut() {
        Some(app) => app.frame(ts),
        None => false,
    });
    if keep_going {
        request_frame();
    } else {
        LOOP_RUNNING.with(|r| r.set(false));
    }
}
