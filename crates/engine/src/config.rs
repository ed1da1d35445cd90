//! Runtime configuration read from environment variables.
//!
//! Every variable is optional and parsed leniently: anything that does not
//! parse falls back to the default.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{DEFAULT_STATE_PATH, FRAME_MS, MAX_SPEED, MIN_GRID_SIZE, MIN_SPEED};

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Save file; `None` disables loading and autosave.
    pub state_path: Option<PathBuf>,
    /// Shape RNG seed; `None` seeds from the clock.
    pub seed: Option<u32>,
    /// Starting speed, within `MIN_SPEED..=MAX_SPEED`.
    pub speed: i32,
    /// Grid width override (default: half the terminal columns).
    pub width: Option<usize>,
    /// Grid height override (default: terminal rows minus the info bar).
    pub height: Option<usize>,
    pub frame_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_path: Some(PathBuf::from(DEFAULT_STATE_PATH)),
            seed: None,
            speed: 0,
            width: None,
            height: None,
            frame_ms: FRAME_MS,
        }
    }
}

impl Config {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (environment, tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let disabled = lookup("BLOCKFALL_NO_SAVE")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);
        let state_path = if disabled {
            None
        } else {
            lookup("BLOCKFALL_STATE_PATH")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .or(defaults.state_path)
        };

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let speed = lookup("BLOCKFALL_SPEED")
            .and_then(|s| s.trim().parse::<i32>().ok())
            .map(|s| s.clamp(MIN_SPEED, MAX_SPEED))
            .unwrap_or(defaults.speed);

        let size = |key: &str| {
            lookup(key)
                .and_then(|s| s.trim().parse::<usize>().ok())
                .map(|n| n.max(MIN_GRID_SIZE))
        };

        let frame_ms = lookup("BLOCKFALL_FRAME_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
            .unwrap_or(defaults.frame_ms);

        Self {
            state_path,
            seed,
            speed,
            width: size("BLOCKFALL_WIDTH"),
            height: size("BLOCKFALL_HEIGHT"),
            frame_ms,
        }
    }

    /// Grid size for a terminal of `cols x rows` cells.
    ///
    /// Each grid cell is two columns wide and the top row holds the info bar.
    pub fn grid_size(&self, cols: u16, rows: u16) -> (usize, usize) {
        let width = self.width.unwrap_or(cols as usize / 2);
        let height = self
            .height
            .unwrap_or_else(|| (rows as usize).saturating_sub(1));
        (width.max(MIN_GRID_SIZE), height.max(MIN_GRID_SIZE))
    }

    /// The configured seed, or one derived from the system clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        assert_eq!(config_from(&[]), Config::default());
        assert_eq!(
            Config::default().state_path,
            Some(PathBuf::from("state.json"))
        );
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("BLOCKFALL_STATE_PATH", " /tmp/blocks.json "),
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_SPEED", "-3"),
            ("BLOCKFALL_WIDTH", "12"),
            ("BLOCKFALL_HEIGHT", "2"),
            ("BLOCKFALL_FRAME_MS", "10"),
        ]);
        assert_eq!(config.state_path, Some(PathBuf::from("/tmp/blocks.json")));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.speed, -3);
        assert_eq!(config.width, Some(12));
        assert_eq!(config.height, Some(MIN_GRID_SIZE));
        assert_eq!(config.frame_ms, 10);
    }

    #[test]
    fn no_save_wins_over_path() {
        let config = config_from(&[
            ("BLOCKFALL_NO_SAVE", "TRUE"),
            ("BLOCKFALL_STATE_PATH", "x.json"),
        ]);
        assert_eq!(config.state_path, None);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("BLOCKFALL_SEED", "abc"),
            ("BLOCKFALL_SPEED", "99"),
            ("BLOCKFALL_FRAME_MS", "0"),
            ("BLOCKFALL_STATE_PATH", "   "),
        ]);
        assert_eq!(config.seed, None);
        assert_eq!(config.speed, MAX_SPEED);
        assert_eq!(config.frame_ms, FRAME_MS);
        assert_eq!(config.state_path, Some(PathBuf::from(DEFAULT_STATE_PATH)));
    }

    #[test]
    fn grid_size_follows_terminal() {
        let config = Config::default();
        assert_eq!(config.grid_size(80, 24), (40, 23));
        assert_eq!(config.grid_size(3, 1), (MIN_GRID_SIZE, MIN_GRID_SIZE));

        let fixed = Config {
            width: Some(10),
            height: Some(20),
            ..Config::default()
        };
        assert_eq!(fixed.grid_size(200, 60), (10, 20));
    }
}
