use clap::Args;
use minesweeper_core::{CellCount, Coord, GameConfig, GameError, MineCount, cell_count};
use thiserror::Error;

/// Default digit colors for 1 through 8 adjacent mines.
pub(crate) const DIGIT_COLORS: [&str; 8] = [
    "red", "blue", "yellow", "green", "#f0f", "orange", "aqua", "white",
];

#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum SettingsError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("expected {expected} digit colors, got {0}", expected = DIGIT_COLORS.len())]
    Palette(usize),
}

/// Splits a location hash like `#--width=16&--background=#aaa` into clap arguments.
///
/// Only the leading `#` is stripped, so color values may use hex notation.
pub(crate) fn hash_args(hash: &str) -> impl Iterator<Item = &str> {
    let hash = hash.strip_prefix('#').unwrap_or(hash);
    core::iter::once("minesweeper").chain(hash.split('&').filter(|arg| !arg.is_empty()))
}

/// Game options, read from the page URL hash.
#[derive(Args, Debug, Clone, PartialEq)]
pub(crate) struct SettingsArgs {
    /// Number of columns
    #[arg(long, default_value_t = 8)]
    width: Coord,

    /// Number of rows
    #[arg(long, default_value_t = 8)]
    height: Coord,

    /// Exact mine count, overrides the min/max range
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Lowest random mine count [default: a fifth of the cells]
    #[arg(long)]
    min_mines: Option<CellCount>,

    /// Highest random mine count [default: a third of the cells]
    #[arg(long)]
    max_mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cell width in pixels
    #[arg(long, default_value_t = 64)]
    cell_width: u16,

    /// Cell height in pixels
    #[arg(long, default_value_t = 64)]
    cell_height: u16,

    /// Color behind opened cells
    #[arg(long, default_value = "#aaa")]
    background: String,

    /// Comma-separated colors for the digits 1 through 8
    #[arg(long, value_delimiter = ',')]
    colors: Vec<String>,

    /// Audio file played when a mine goes off
    #[arg(long)]
    boom_sound: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RenderConfig {
    pub cell_width: u16,
    pub cell_height: u16,
    pub background: String,
    /// Index `n` colors the digit `n + 1`.
    pub colors: Vec<String>,
}

impl RenderConfig {
    pub(crate) fn font_size(&self) -> u32 {
        ((f64::from(self.cell_width) + f64::from(self.cell_height)) / 3.5).floor() as u32
    }

    pub(crate) fn digit_color(&self, digit: u8) -> &str {
        usize::from(digit)
            .checked_sub(1)
            .and_then(|index| self.colors.get(index))
            .or_else(|| self.colors.last())
            .map_or(DIGIT_COLORS[DIGIT_COLORS.len() - 1], String::as_str)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_width: 64,
            cell_height: 64,
            background: "#aaa".into(),
            colors: DIGIT_COLORS.map(String::from).to_vec(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Settings {
    pub game_config: GameConfig,
    pub render: RenderConfig,
    pub seed: Option<u64>,
    pub boom_sound: Option<String>,
}

impl Settings {
    pub(crate) fn from_args(args: SettingsArgs) -> Result<Self, SettingsError> {
        let size = (args.width, args.height);
        let total = cell_count(size);
        let mines = match (args.mines, args.min_mines, args.max_mines) {
            (Some(count), _, _) => MineCount::Fixed(count),
            (None, min, max) => MineCount::Range {
                min: min.unwrap_or(total / 5),
                max: max.unwrap_or(total / 3),
            },
        };

        let colors = match args.colors.len() {
            0 => RenderConfig::default().colors,
            count if count == DIGIT_COLORS.len() => args.colors,
            count => return Err(SettingsError::Palette(count)),
        };

        Ok(Self {
            game_config: GameConfig::new(size, mines)?,
            render: RenderConfig {
                cell_width: args.cell_width.max(1),
                cell_height: args.cell_height.max(1),
                background: args.background,
                colors,
            },
            seed: args.seed,
            boom_sound: args.boom_sound,
        })
    }
}
