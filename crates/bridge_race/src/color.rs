//! Block colors
//!
//! A color is both what a runner, its blocks and its bridge look like and the
//! identity that decides which blocks a runner may pick up.

use race_engine::ecs::Color;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity tag shared by a runner, its collectables and its bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockColor {
    /// The player's color
    Azure,
    /// The bot's color
    Red,
}

impl BlockColor {
    /// Every color a block can have
    pub const ALL: [BlockColor; 2] = [BlockColor::Azure, BlockColor::Red];

    /// Render color
    pub fn color(self) -> Color {
        match self {
            BlockColor::Azure => Color::rgb(0.0, 0.5, 1.0),
            BlockColor::Red => Color::rgb(1.0, 0.0, 0.0),
        }
    }

    /// Pick a color uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for BlockColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockColor::Azure => write!(f, "azure"),
            BlockColor::Red => write!(f, "red"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_produces_both_colors() {
        let mut rng = StdRng::seed_from_u64(3);
        let picks: Vec<_> = (0..64).map(|_| BlockColor::random(&mut rng)).collect();
        assert!(picks.contains(&BlockColor::Azure));
        assert!(picks.contains(&BlockColor::Red));
    }

    #[test]
    fn test_colors_are_distinct() {
        assert_ne!(BlockColor::Azure.color(), BlockColor::Red.color());
        assert_eq!(BlockColor::Red.to_string(), "red");
    }
}
