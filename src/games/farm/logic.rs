/// Farm game logic: pure functions over `FarmState`.
///
/// Every mutating operation validates all of its preconditions before it
/// touches anything, so an `Err` always means the state is exactly as it was.

use super::catalog::{CropCatalog, CropId, CropInfo};
use super::error::FarmError;
use super::state::{FarmState, Grid, Player, GRID_SIZE, MAX_ENERGY};

/// Glyph for an empty plot.
pub const EMPTY_GLYPH: char = '.';
/// Glyph for a plot that is still growing.
pub const GROWING_GLYPH: char = '^';

/// What a night's sleep changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayReport {
    /// The day that just started.
    pub day: u32,
    /// Plots that finished growing overnight.
    pub matured: usize,
}

fn check_bounds(row: usize, col: usize) -> Result<(), FarmError> {
    if row < GRID_SIZE && col < GRID_SIZE {
        Ok(())
    } else {
        Err(FarmError::InvalidPosition {
            row: i64::try_from(row).unwrap_or(i64::MAX),
            col: i64::try_from(col).unwrap_or(i64::MAX),
        })
    }
}

fn lookup<'a>(catalog: &'a CropCatalog, crop: &CropId) -> Result<&'a CropInfo, FarmError> {
    catalog
        .get(crop)
        .ok_or_else(|| FarmError::UnknownCrop(crop.clone()))
}

fn spend_energy(player: &mut Player) -> Result<(), FarmError> {
    if player.energy == 0 {
        return Err(FarmError::InsufficientEnergy);
    }
    player.energy -= 1;
    Ok(())
}

// ── Shop ─────────────────────────────────────────────────────────────

/// Buy `quantity` seeds of `crop`.
pub fn buy_seeds(state: &mut FarmState, crop: &CropId, quantity: u32) -> Result<(), FarmError> {
    let info = lookup(state.catalog, crop)?;
    if quantity == 0 {
        return Err(FarmError::InvalidQuantity);
    }
    let money = state.player.money;
    let cost = info.seed_price.checked_mul(quantity as u64);
    let cost = match cost {
        Some(cost) if cost <= money => cost,
        _ => {
            let cost = cost.unwrap_or(u64::MAX);
            log::debug!("refused {} x {}: cost {} > money {}", quantity, crop, cost, money);
            return Err(FarmError::InsufficientFunds { cost, money });
        }
    };

    state.player.money -= cost;
    state.player.add_seeds(crop, quantity);
    log::info!("bought {} {} seeds for ${}", quantity, crop, cost);
    Ok(())
}

// ── Field work ───────────────────────────────────────────────────────

/// Plant one seed of `crop` at (row, col).
pub fn plant_seed(
    state: &mut FarmState,
    row: usize,
    col: usize,
    crop: &CropId,
) -> Result<(), FarmError> {
    check_bounds(row, col)?;
    if state.grid[row][col].is_planted() {
        return Err(FarmError::PlotOccupied);
    }
    let info = lookup(state.catalog, crop)?;
    if state.player.seed_count(crop) == 0 {
        return Err(FarmError::NoSeeds { crop: crop.clone() });
    }
    if state.player.energy == 0 {
        return Err(FarmError::InsufficientEnergy);
    }

    state.player.take_seed(crop);
    state.player.energy -= 1;
    state.grid[row][col].plant(info);
    log::info!("planted {} at ({}, {}), ready in {} day(s)", crop, row, col, info.growth_days);
    Ok(())
}

/// Water the crop at (row, col). Watering twice is allowed and costs energy
/// both times.
pub fn water_plot(state: &mut FarmState, row: usize, col: usize) -> Result<(), FarmError> {
    check_bounds(row, col)?;
    if !state.grid[row][col].is_planted() {
        return Err(FarmError::NoCropPlanted);
    }
    spend_energy(&mut state.player)?;
    state.grid[row][col].watered = true;
    log::debug!("watered ({}, {})", row, col);
    Ok(())
}

/// Harvest a mature crop at (row, col). Returns the money earned.
pub fn harvest_plot(state: &mut FarmState, row: usize, col: usize) -> Result<u64, FarmError> {
    check_bounds(row, col)?;
    let plot = &state.grid[row][col];
    let Some(crop) = &plot.crop else {
        return Err(FarmError::NoCropPlanted);
    };
    if plot.days_left > 0 {
        return Err(FarmError::CropNotReady {
            days_left: plot.days_left,
        });
    }
    let earned = lookup(state.catalog, crop)?.sell_price;

    state.player.money = state.player.money.saturating_add(earned);
    state.grid[row][col].clear();
    log::info!("harvested ({}, {}) for ${}", row, col, earned);
    Ok(earned)
}

// ── Time ─────────────────────────────────────────────────────────────

/// End the day: advance the calendar, refill energy, grow every crop by one
/// day. Watered flags are left as they are.
pub fn advance_day(state: &mut FarmState) -> DayReport {
    state.player.day += 1;
    state.player.energy = MAX_ENERGY;

    let mut matured = 0;
    for plot in state.grid.iter_mut().flatten() {
        if plot.is_planted() && plot.days_left > 0 {
            plot.days_left -= 1;
            if plot.days_left == 0 {
                matured += 1;
            }
        }
    }

    log::info!("day {} begins, {} crop(s) matured overnight", state.player.day, matured);
    DayReport {
        day: state.player.day,
        matured,
    }
}

// ── Queries ──────────────────────────────────────────────────────────

/// Display glyph for every plot: empty, growing, or the crop's own glyph.
pub fn glyph_grid(grid: &Grid, catalog: &CropCatalog) -> [[char; GRID_SIZE]; GRID_SIZE] {
    let mut out = [[EMPTY_GLYPH; GRID_SIZE]; GRID_SIZE];
    for (row, plots) in grid.iter().enumerate() {
        for (col, plot) in plots.iter().enumerate() {
            out[row][col] = match &plot.crop {
                None => EMPTY_GLYPH,
                Some(_) if plot.days_left > 0 => GROWING_GLYPH,
                Some(id) => catalog.get(id).map(|c| c.glyph).unwrap_or('?'),
            };
        }
    }
    out
}

/// Coordinates of every plot ready to harvest.
pub fn mature_plots(grid: &Grid) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for (row, plots) in grid.iter().enumerate() {
        for (col, plot) in plots.iter().enumerate() {
            if plot.is_mature() {
                out.push((row, col));
            }
        }
    }
    out
}

pub fn status_line(player: &Player) -> String {
    format!(
        "Day {} | Money: ${} | Energy: {}/{}",
        player.day, player.money, player.energy, MAX_ENERGY
    )
}

/// Plain-text snapshot of the farm, one row of glyphs per line.
pub fn farm_text(state: &FarmState) -> String {
    let mut out = String::from("=== Farm Vibes ===\n");
    out.push_str(&status_line(&state.player));
    out.push_str("\n\nYour Farm:\n");
    for row in glyph_grid(&state.grid, state.catalog) {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}
