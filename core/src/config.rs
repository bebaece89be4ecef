use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// How many mines go on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MineCount {
    Fixed(CellCount),
    /// Drawn uniformly from `min..=max` when the game starts.
    Range { min: CellCount, max: CellCount },
}

impl MineCount {
    /// The classic density range: a fifth to a third of the board.
    pub const fn default_for(size: Coord2) -> Self {
        let total = cell_count(size);
        Self::Range {
            min: total / 5,
            max: total / 3,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: MineCount,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord2 = (8, 8);

    pub fn new(size: Coord2, mines: MineCount) -> Result<Self> {
        let config = Self { size, mines };
        config.validate()?;
        Ok(config)
    }

    /// Board of the given size with the default mine density.
    pub fn with_size(size: Coord2) -> Result<Self> {
        Self::new(size, MineCount::default_for(size))
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.size)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }

        let upper = match self.mines {
            MineCount::Fixed(count) => count,
            MineCount::Range { min, max } if min > max => {
                return Err(ConfigError::InvalidMineRange.into());
            }
            MineCount::Range { max, .. } => max,
        };
        if upper >= self.total_cells() {
            return Err(ConfigError::TooManyMines.into());
        }

        Ok(())
    }

    /// Settles on a concrete mine count, drawing from the range if there is one.
    pub fn resolve_mine_count<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CellCount> {
        use rand::prelude::*;

        self.validate()?;
        Ok(match self.mines {
            MineCount::Fixed(count) => count,
            MineCount::Range { min, max } => rng.random_range(min..=max),
        })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            mines: MineCount::default_for(Self::DEFAULT_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::wasm_bindgen_test as test;

    #[test]
    fn default_is_eight_by_eight_with_classic_density() {
        let config = GameConfig::default();

        assert_eq!(config.size, (8, 8));
        assert_eq!(config.mines, MineCount::Range { min: 12, max: 21 });
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_boards() {
        assert_eq!(
            GameConfig::new((0, 5), MineCount::Fixed(0)),
            Err(GameError::InvalidConfiguration(ConfigError::EmptyBoard))
        );
        assert_eq!(
            GameConfig::with_size((5, 0)),
            Err(GameError::InvalidConfiguration(ConfigError::EmptyBoard))
        );
    }

    #[test]
    fn rejects_boards_without_a_safe_cell() {
        assert_eq!(
            GameConfig::new((3, 3), MineCount::Fixed(9)),
            Err(GameError::InvalidConfiguration(ConfigError::TooManyMines))
        );
        assert_eq!(
            GameConfig::new((3, 3), MineCount::Range { min: 1, max: 9 }),
            Err(GameError::InvalidConfiguration(ConfigError::TooManyMines))
        );
        assert!(GameConfig::new((3, 3), MineCount::Fixed(8)).is_ok());
    }

    #[test]
    fn rejects_inverted_ranges() {
        assert_eq!(
            GameConfig::new((4, 4), MineCount::Range { min: 5, max: 2 }),
            Err(GameError::InvalidConfiguration(ConfigError::InvalidMineRange))
        );
    }

    #[test]
    fn resolved_count_stays_within_range() {
        let config = GameConfig::new((10, 10), MineCount::Range { min: 10, max: 20 }).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let count = config.resolve_mine_count(&mut rng).unwrap();
            assert!((10..=20).contains(&count));
        }
    }

    #[test]
    fn fixed_count_resolves_to_itself() {
        let config = GameConfig::new((4, 4), MineCount::Fixed(3)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(config.resolve_mine_count(&mut rng), Ok(3));
    }
}
