/// Farm Vibes: a turn-based 5×5 crop farm.

pub mod actions;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::CropCatalog;
use command::{Command, Outcome};
use config::FarmConfig;
use state::{FarmState, GRID_SIZE};

/// Control characters the front end sends for non-printing keys.
pub const KEY_ENTER: char = '\n';
pub const KEY_BACKSPACE: char = '\u{8}';
pub const KEY_ESCAPE: char = '\u{1b}';

pub struct FarmGame {
    pub state: FarmState,
}

impl FarmGame {
    pub fn new() -> Self {
        Self {
            state: FarmState::new(),
        }
    }

    pub fn with_config(config: FarmConfig) -> Self {
        Self {
            state: FarmState::with_setup(config, CropCatalog::builtin()),
        }
    }

    /// Run a command and write the result to the log.
    fn run(&mut self, command: Command) {
        match command::execute(&mut self.state, command) {
            Ok(outcome) => {
                let msg = command::describe(&self.state, &outcome);
                self.state.add_log(&msg);
                if let Outcome::Slept(_) = outcome {
                    log::debug!("\n{}", logic::farm_text(&self.state));
                }
            }
            Err(e) => {
                log::debug!("command refused: {}", e);
                self.state.add_log(&e.to_string());
            }
        }
    }

    /// Cursor position as command coordinates.
    fn cursor(&self) -> (i64, i64) {
        (self.state.cursor_row as i64, self.state.cursor_col as i64)
    }

    fn plant_at_cursor(&mut self) {
        let Some(crop) = self.state.selected_crop_info() else {
            return;
        };
        let (row, col) = self.cursor();
        self.run(Command::Plant {
            row,
            col,
            crop: crop.id.clone(),
        });
    }

    fn buy_selected(&mut self, quantity: u32) {
        let Some(crop) = self.state.selected_crop_info() else {
            return;
        };
        self.run(Command::Buy {
            crop: crop.id.clone(),
            quantity,
        });
    }

    /// Keys typed while the command prompt is open.
    fn handle_prompt_key(&mut self, key: char) {
        let Some(line) = self.state.prompt.as_mut() else {
            return;
        };
        match key {
            KEY_ESCAPE => self.state.prompt = None,
            KEY_BACKSPACE => {
                line.pop();
            }
            KEY_ENTER => {
                let line = self.state.prompt.take().unwrap_or_default();
                if line.trim().is_empty() {
                    return;
                }
                self.state.add_log(&format!("> {}", line));
                match Command::parse(&line) {
                    Ok(command) => self.run(command),
                    Err(e) => self.state.add_log(&e.to_string()),
                }
            }
            c if !c.is_control() => line.push(c),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        if self.state.prompt.is_some() {
            self.handle_prompt_key(key);
            return true;
        }
        let (row, col) = self.cursor();
        match key {
            'h' => self.state.move_cursor(0, -1),
            'l' => self.state.move_cursor(0, 1),
            'k' => self.state.move_cursor(-1, 0),
            'j' => self.state.move_cursor(1, 0),
            '1'..='9' => {
                let index = (key as u8 - b'1') as usize;
                return self.state.select_crop(index);
            }
            'p' => self.plant_at_cursor(),
            'w' => self.run(Command::Water { row, col }),
            'g' => self.run(Command::Harvest { row, col }),
            'b' => self.buy_selected(1),
            'B' => self.buy_selected(5),
            'z' => self.run(Command::Sleep),
            ':' => self.state.prompt = Some(String::new()),
            _ => return false,
        }
        true
    }

    fn handle_click(&mut self, id: u16) -> bool {
        let (row, col) = self.cursor();
        match id {
            PLANT => self.plant_at_cursor(),
            WATER => self.run(Command::Water { row, col }),
            HARVEST => self.run(Command::Harvest { row, col }),
            SLEEP => self.run(Command::Sleep),
            OPEN_PROMPT => self.state.prompt = Some(String::new()),
            BUY_ONE => self.buy_selected(1),
            BUY_FIVE => self.buy_selected(5),
            id if (SELECT_CROP_BASE..CELL_BASE).contains(&id) => {
                return self.state.select_crop((id - SELECT_CROP_BASE) as usize);
            }
            id if id >= CELL_BASE && ((id - CELL_BASE) as usize) < GRID_SIZE * GRID_SIZE => {
                let idx = (id - CELL_BASE) as usize;
                self.state.cursor_row = idx / GRID_SIZE;
                self.state.cursor_col = idx % GRID_SIZE;
            }
            _ => return false,
        }
        true
    }
}

impl Game for FarmGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::CropId;

    fn press(game: &mut FarmGame, keys: &str) {
        for c in keys.chars() {
            game.handle_input(&InputEvent::Key(c));
        }
    }

    #[test]
    fn farm_game_move_cursor() {
        let mut game = FarmGame::new();
        press(&mut game, "ll");
        assert_eq!(game.state.cursor_col, 2);
        press(&mut game, "j");
        assert_eq!(game.state.cursor_row, 1);
        press(&mut game, "kkkhhhh");
        assert_eq!((game.state.cursor_row, game.state.cursor_col), (0, 0));
    }

    #[test]
    fn farm_game_buy_plant_water_via_keys() {
        let mut game = FarmGame::new();
        press(&mut game, "bpw");
        assert_eq!(game.state.player.money, 45);
        assert_eq!(game.state.player.energy, 8);
        let plot = &game.state.grid[0][0];
        assert_eq!(plot.crop, Some(CropId::new("carrot")));
        assert!(plot.watered);
        assert_eq!(game.state.log.last().unwrap(), "Watered (0, 0)");
    }

    #[test]
    fn farm_game_full_carrot_cycle() {
        let mut game = FarmGame::new();
        press(&mut game, "bpzg");
        assert_eq!(game.state.player.money, 45 + 12);
        assert_eq!(game.state.player.day, 2);
        assert!(!game.state.grid[0][0].is_planted());
    }

    #[test]
    fn farm_game_select_crop_keys() {
        let mut game = FarmGame::new();
        assert!(game.handle_input(&InputEvent::Key('3')));
        assert_eq!(game.state.selected_crop, 2);
        // No fourth crop in the built-in catalog.
        assert!(!game.handle_input(&InputEvent::Key('4')));
        assert_eq!(game.state.selected_crop, 2);

        press(&mut game, "B");
        assert_eq!(
            game.state.log.last().unwrap(),
            "insufficient funds: need $60, have $50"
        );
        assert_eq!(game.state.player.money, 50);
    }

    #[test]
    fn farm_game_errors_go_to_log() {
        let mut game = FarmGame::new();
        press(&mut game, "p");
        assert_eq!(game.state.log.last().unwrap(), "no carrot seeds in inventory");
        press(&mut game, "g");
        assert_eq!(game.state.log.last().unwrap(), "no crop planted here");
    }

    #[test]
    fn farm_game_click_cell_and_actions() {
        let mut game = FarmGame::new();
        let idx = 2 * GRID_SIZE as u16 + 3;
        assert!(game.handle_input(&InputEvent::Click(CELL_BASE + idx)));
        assert_eq!((game.state.cursor_row, game.state.cursor_col), (2, 3));

        assert!(game.handle_input(&InputEvent::Click(SELECT_CROP_BASE + 1)));
        game.handle_input(&InputEvent::Click(BUY_ONE));
        game.handle_input(&InputEvent::Click(PLANT));
        assert_eq!(game.state.grid[2][3].crop, Some(CropId::new("tomato")));

        game.handle_input(&InputEvent::Click(SLEEP));
        assert_eq!(game.state.player.day, 2);
        assert_eq!(game.state.grid[2][3].days_left, 1);
    }

    #[test]
    fn farm_game_prompt_runs_typed_commands() {
        let mut game = FarmGame::new();
        press(&mut game, ":buy tomato 2");
        game.handle_input(&InputEvent::Key(KEY_ENTER));
        assert!(game.state.prompt.is_none());
        assert_eq!(game.state.player.seed_count(&CropId::new("tomato")), 2);
        assert_eq!(game.state.log[game.state.log.len() - 2], "> buy tomato 2");

        press(&mut game, ":plant 1 1 tomatx");
        game.handle_input(&InputEvent::Key(KEY_BACKSPACE));
        press(&mut game, "o");
        game.handle_input(&InputEvent::Key(KEY_ENTER));
        assert_eq!(game.state.grid[1][1].crop, Some(CropId::new("tomato")));
    }

    #[test]
    fn farm_game_prompt_swallows_keys_and_reports_parse_errors() {
        let mut game = FarmGame::new();
        press(&mut game, ":z");
        // 'z' was typed into the prompt, not slept on.
        assert_eq!(game.state.player.day, 1);
        assert_eq!(game.state.prompt.as_deref(), Some("z"));
        game.handle_input(&InputEvent::Key(KEY_ESCAPE));
        assert!(game.state.prompt.is_none());

        press(&mut game, ":dance");
        game.handle_input(&InputEvent::Key(KEY_ENTER));
        assert_eq!(game.state.log.last().unwrap(), "unknown action 'dance'");
    }

    #[test]
    fn farm_game_with_config() {
        let config = FarmConfig {
            starting_money: 7,
            ..FarmConfig::default()
        };
        let game = FarmGame::with_config(config);
        assert_eq!(game.state.player.money, 7);
    }

    #[test]
    fn farm_game_ignores_unknown_input() {
        let mut game = FarmGame::new();
        assert!(!game.handle_input(&InputEvent::Key('x')));
        assert!(!game.handle_input(&InputEvent::Click(999)));
        assert!(!game.handle_input(&InputEvent::Click(SELECT_CROP_BASE + 50)));
    }
}
