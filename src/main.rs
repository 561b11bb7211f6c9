mod console_log;
mod games;
mod input;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use games::farm::config::FarmConfig;
use games::farm::{FarmGame, KEY_BACKSPACE, KEY_ENTER, KEY_ESCAPE};
use games::Game;
use input::{pixel_to_cell, ClickState, InputEvent};

/// Convert a mouse position in page pixels to a terminal (col, row).
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend renders its grid into a <div> directly under <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_to_cell(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_to_cell(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

/// Read config overrides from `<script id="farm-config" type="application/json">`.
/// `None` when the tag is absent or fails validation; a rejected tag is logged
/// and the game starts from defaults.
fn load_config() -> Option<FarmConfig> {
    let text = web_sys::window()?
        .document()?
        .get_element_by_id("farm-config")?
        .text_content()?;
    match FarmConfig::from_json(&text) {
        Ok(config) => {
            log::info!("loaded farm config: {:?}", config);
            Some(config)
        }
        Err(e) => {
            log::warn!("ignoring farm-config: {}", e);
            None
        }
    }
}

/// Keyboard codes the farm understands, as the characters it dispatches on.
fn key_to_char(code: &KeyCode) -> Option<char> {
    match code {
        KeyCode::Char(c) => Some(*c),
        KeyCode::Enter => Some(KEY_ENTER),
        KeyCode::Backspace => Some(KEY_BACKSPACE),
        KeyCode::Esc => Some(KEY_ESCAPE),
        KeyCode::Left => Some('h'),
        KeyCode::Down => Some('j'),
        KeyCode::Up => Some('k'),
        KeyCode::Right => Some('l'),
        _ => None,
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    console_log::init();

    let game = match load_config() {
        Some(config) => FarmGame::with_config(config),
        None => FarmGame::new(),
    };
    let game = Rc::new(RefCell::new(game));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;
    log::info!("Farm Vibes started");

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            log::debug!("click at ({}, {}) -> {:?}", col, row, action);
            if let Some(id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let Some(c) = key_to_char(&key_event.code) {
                game.borrow_mut().handle_input(&InputEvent::Key(c));
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }
            game.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}
