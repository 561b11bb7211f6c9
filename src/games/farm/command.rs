//! Text commands for the farm engine.
//!
//! A `Command` is one player action with its arguments. `Command::parse`
//! turns a typed line (`plant 0 0 carrot`, `buy corn 2`, `sleep`) into a
//! command and `execute` runs it against a `FarmState`, returning what
//! happened or the engine's refusal.

use thiserror::Error;

use super::catalog::CropId;
use super::error::FarmError;
use super::logic::{self, DayReport};
use super::state::FarmState;

/// A player action with its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Coordinates are signed so that `-1` reaches the engine as an
    /// out-of-farm position instead of a parse failure.
    Plant { row: i64, col: i64, crop: CropId },
    Water { row: i64, col: i64 },
    Harvest { row: i64, col: i64 },
    Buy { crop: CropId, quantity: u32 },
    Sleep,
}

/// Result of a command that went through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Bought { crop: CropId, quantity: u32 },
    Planted { row: usize, col: usize, crop: CropId },
    Watered { row: usize, col: usize },
    Harvested { row: usize, col: usize, earned: u64 },
    Slept(DayReport),
}

/// Why a line of text is not a command.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no command given")]
    Empty,
    #[error("unknown action '{0}'")]
    UnknownAction(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("'{value}' is not a valid {what}")]
    InvalidNumber { what: &'static str, value: String },
}

fn number<T: std::str::FromStr>(
    arg: Option<&str>,
    what: &'static str,
) -> Result<T, ParseError> {
    let raw = arg.ok_or(ParseError::MissingArgument(what))?;
    raw.parse().map_err(|_| ParseError::InvalidNumber {
        what,
        value: raw.to_string(),
    })
}

fn crop(arg: Option<&str>) -> Result<CropId, ParseError> {
    arg.map(CropId::from)
        .ok_or(ParseError::MissingArgument("crop"))
}

impl Command {
    /// Parse one line. Words are whitespace separated and case-insensitive.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let lowered = line.trim().to_lowercase();
        let mut words = lowered.split_whitespace();
        let action = words.next().ok_or(ParseError::Empty)?;

        match action {
            "p" | "plant" => Ok(Command::Plant {
                row: number(words.next(), "row")?,
                col: number(words.next(), "column")?,
                crop: crop(words.next())?,
            }),
            "w" | "water" => Ok(Command::Water {
                row: number(words.next(), "row")?,
                col: number(words.next(), "column")?,
            }),
            "h" | "harvest" => Ok(Command::Harvest {
                row: number(words.next(), "row")?,
                col: number(words.next(), "column")?,
            }),
            "b" | "buy" | "s" | "shop" => Ok(Command::Buy {
                crop: crop(words.next())?,
                quantity: number(words.next(), "quantity")?,
            }),
            "sleep" | "z" => Ok(Command::Sleep),
            other => Err(ParseError::UnknownAction(other.to_string())),
        }
    }
}

/// Grid indices for signed coordinates; negatives are outside the farm.
fn position(row: i64, col: i64) -> Result<(usize, usize), FarmError> {
    match (usize::try_from(row), usize::try_from(col)) {
        (Ok(r), Ok(c)) => Ok((r, c)),
        _ => Err(FarmError::InvalidPosition { row, col }),
    }
}

/// Run a command against the farm.
pub fn execute(state: &mut FarmState, command: Command) -> Result<Outcome, FarmError> {
    match command {
        Command::Plant { row, col, crop } => {
            let (row, col) = position(row, col)?;
            logic::plant_seed(state, row, col, &crop)?;
            Ok(Outcome::Planted { row, col, crop })
        }
        Command::Water { row, col } => {
            let (row, col) = position(row, col)?;
            logic::water_plot(state, row, col)?;
            Ok(Outcome::Watered { row, col })
        }
        Command::Harvest { row, col } => {
            let (row, col) = position(row, col)?;
            let earned = logic::harvest_plot(state, row, col)?;
            Ok(Outcome::Harvested { row, col, earned })
        }
        Command::Buy { crop, quantity } => {
            logic::buy_seeds(state, &crop, quantity)?;
            Ok(Outcome::Bought { crop, quantity })
        }
        Command::Sleep => Ok(Outcome::Slept(logic::advance_day(state))),
    }
}

/// One-line message for the log describing an outcome.
pub fn describe(state: &FarmState, outcome: &Outcome) -> String {
    let name = |crop: &CropId| {
        state
            .catalog
            .get(crop)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| crop.to_string())
    };
    match outcome {
        Outcome::Bought { crop, quantity } => {
            format!("Bought {} {} seed(s). ${} left", quantity, name(crop), state.player.money)
        }
        Outcome::Planted { row, col, crop } => {
            format!("Planted {} at ({}, {})", name(crop), row, col)
        }
        Outcome::Watered { row, col } => format!("Watered ({}, {})", row, col),
        Outcome::Harvested { row, col, earned } => {
            format!("Harvested ({}, {}) for ${}", row, col, earned)
        }
        Outcome::Slept(report) if report.matured > 0 => format!(
            "Good morning! Day {}. {} crop(s) ready to harvest",
            report.day, report.matured
        ),
        Outcome::Slept(report) => format!("Good morning! Day {}", report.day),
    }
}
