//! Semantic action IDs for Farm Vibes click targets.
//!
//! Registered during render and dispatched back through `InputEvent::Click`.

// ── Field work ──────────────────────────────────────────────────
pub const PLANT: u16 = 1;
pub const WATER: u16 = 2;
pub const HARVEST: u16 = 3;
pub const SLEEP: u16 = 4;
pub const OPEN_PROMPT: u16 = 5;

// ── Shop ────────────────────────────────────────────────────────
pub const BUY_ONE: u16 = 10;
pub const BUY_FIVE: u16 = 11;

// ── Crop selection (base + catalog index) ───────────────────────
pub const SELECT_CROP_BASE: u16 = 100;

// ── Grid cells (base + row * GRID_SIZE + col) ───────────────────
pub const CELL_BASE: u16 = 200;
