/// Farm game state: the player, the plot grid, and UI selection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{CropCatalog, CropId, CropInfo};
use super::config::FarmConfig;

/// Rows and columns of the farm. The grid never resizes.
pub const GRID_SIZE: usize = 5;

/// Energy on a fresh morning, and the most the player can hold.
pub const MAX_ENERGY: u32 = 10;

/// A single field cell.
///
/// `crop == None` is the cleared state; `days_left` and `watered` are only
/// meaningful while something is planted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plot {
    pub crop: Option<CropId>,
    pub days_left: u32,
    pub watered: bool,
}

impl Plot {
    pub fn is_planted(&self) -> bool {
        self.crop.is_some()
    }

    /// Planted and done growing.
    pub fn is_mature(&self) -> bool {
        self.is_planted() && self.days_left == 0
    }

    pub fn plant(&mut self, crop: &CropInfo) {
        self.crop = Some(crop.id.clone());
        self.days_left = crop.growth_days;
        self.watered = false;
    }

    /// Back to an empty, dry plot.
    pub fn clear(&mut self) {
        *self = Plot::default();
    }
}

/// Plot grid indexed `[row][col]`.
pub type Grid = [[Plot; GRID_SIZE]; GRID_SIZE];

/// The farmer's wallet, stamina, calendar and seed bag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub money: u64,
    pub energy: u32,
    pub day: u32,
    /// Seeds owned per crop. A missing key means zero; zero counts are removed.
    pub seeds: BTreeMap<CropId, u32>,
}

impl Player {
    pub fn new(config: &FarmConfig) -> Self {
        Self {
            money: config.starting_money,
            energy: MAX_ENERGY,
            day: config.starting_day,
            seeds: BTreeMap::new(),
        }
    }

    pub fn seed_count(&self, crop: &CropId) -> u32 {
        self.seeds.get(crop).copied().unwrap_or(0)
    }

    pub fn add_seeds(&mut self, crop: &CropId, quantity: u32) {
        let count = self.seeds.entry(crop.clone()).or_insert(0);
        *count = count.saturating_add(quantity);
    }

    /// Remove one seed. Returns false (and changes nothing) if none are owned.
    pub fn take_seed(&mut self, crop: &CropId) -> bool {
        match self.seeds.get_mut(crop) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    self.seeds.remove(crop);
                }
                true
            }
            _ => false,
        }
    }
}

/// Whole session state.
pub struct FarmState {
    pub player: Player,
    pub grid: Grid,
    pub catalog: &'static CropCatalog,
    pub config: FarmConfig,
    /// Cursor position on the grid.
    pub cursor_row: usize,
    pub cursor_col: usize,
    /// Index into the catalog of the crop used by plant/buy.
    pub selected_crop: usize,
    /// Text typed at the command prompt, `None` while the prompt is closed.
    pub prompt: Option<String>,
    /// Message log.
    pub log: Vec<String>,
}

impl FarmState {
    pub fn new() -> Self {
        Self::with_setup(FarmConfig::default(), CropCatalog::builtin())
    }

    pub fn with_setup(config: FarmConfig, catalog: &'static CropCatalog) -> Self {
        Self {
            player: Player::new(&config),
            grid: Grid::default(),
            catalog,
            config,
            cursor_row: 0,
            cursor_col: 0,
            selected_crop: 0,
            prompt: None,
            log: vec!["Welcome to Farm Vibes!".into()],
        }
    }

    pub fn add_log(&mut self, text: &str) {
        self.log.push(text.to_string());
        if self.log.len() > self.config.log_capacity {
            let excess = self.log.len() - self.config.log_capacity;
            self.log.drain(..excess);
        }
    }

    /// Move cursor, clamped to grid bounds.
    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let max = GRID_SIZE as i32 - 1;
        self.cursor_row = (self.cursor_row as i32 + d_row).clamp(0, max) as usize;
        self.cursor_col = (self.cursor_col as i32 + d_col).clamp(0, max) as usize;
    }

    pub fn plot(&self, row: usize, col: usize) -> Option<&Plot> {
        self.grid.get(row)?.get(col)
    }

    /// The crop currently picked for planting and buying.
    pub fn selected_crop_info(&self) -> Option<&'static CropInfo> {
        self.catalog.nth(self.selected_crop)
    }

    pub fn select_crop(&mut self, index: usize) -> bool {
        if index < self.catalog.len() {
            self.selected_crop = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let s = FarmState::new();
        assert_eq!(s.player.money, 50);
        assert_eq!(s.player.energy, 10);
        assert_eq!(s.player.day, 1);
        assert!(s.player.seeds.is_empty());
        assert!(s.grid.iter().flatten().all(|p| *p == Plot::default()));
        assert_eq!((s.cursor_row, s.cursor_col), (0, 0));
    }

    #[test]
    fn move_cursor_clamp() {
        let mut s = FarmState::new();
        s.move_cursor(-1, -1);
        assert_eq!((s.cursor_row, s.cursor_col), (0, 0));

        s.move_cursor(100, 100);
        assert_eq!((s.cursor_row, s.cursor_col), (GRID_SIZE - 1, GRID_SIZE - 1));
    }

    #[test]
    fn log_truncation() {
        let mut s = FarmState::new();
        for i in 0..40 {
            s.add_log(&format!("msg {}", i));
        }
        assert_eq!(s.log.len(), 30);
        assert_eq!(s.log.last().unwrap(), "msg 39");
    }

    #[test]
    fn absent_and_used_up_seeds_look_the_same() {
        let mut p = Player::new(&FarmConfig::default());
        let carrot = CropId::new("carrot");
        assert_eq!(p.seed_count(&carrot), 0);

        p.add_seeds(&carrot, 1);
        assert!(p.take_seed(&carrot));
        assert_eq!(p.seed_count(&carrot), 0);
        assert!(!p.seeds.contains_key(&carrot));
        assert!(!p.take_seed(&carrot));
    }

    #[test]
    fn plot_plant_and_clear() {
        let carrot = CropCatalog::builtin().get(&"carrot".into()).unwrap();
        let mut plot = Plot::default();
        assert!(!plot.is_mature());

        plot.plant(carrot);
        assert!(plot.is_planted());
        assert_eq!(plot.days_left, 1);
        assert!(!plot.is_mature());

        plot.days_left = 0;
        assert!(plot.is_mature());

        plot.watered = true;
        plot.clear();
        assert_eq!(plot, Plot::default());
    }

    #[test]
    fn plot_out_of_range_is_none() {
        let s = FarmState::new();
        assert!(s.plot(4, 4).is_some());
        assert!(s.plot(5, 0).is_none());
        assert!(s.plot(0, 5).is_none());
    }

    #[test]
    fn select_crop_bounds() {
        let mut s = FarmState::new();
        assert!(s.select_crop(2));
        assert_eq!(s.selected_crop_info().unwrap().id.as_str(), "corn");
        assert!(!s.select_crop(3));
        assert_eq!(s.selected_crop, 2);
    }

    #[test]
    fn player_serializes() {
        let mut p = Player::new(&FarmConfig::default());
        p.add_seeds(&CropId::new("tomato"), 2);
        let json = serde_json::to_string(&p).unwrap();
        let loaded: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, p);
    }
}
