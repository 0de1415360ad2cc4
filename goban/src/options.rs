use std::ffi::OsString;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Color, OptionsError};

pub const VALID_BOARD_SIZES: [usize; 6] = [9, 11, 13, 15, 17, 19];
pub const MAX_HANDICAP: u8 = 9;
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 6;
/// The largest whole number of compensation points before the half point is added.
pub const MAX_KOMI_POINTS: u8 = 8;

/// Per-move thinking time handed to the engine. Without it the engine can
/// think for minutes on larger boards.
pub const CLOCK_BUDGET: &str = "1.00s";

/// The scoring rules the engine plays by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rules {
    Chinese,
    Japanese,
}

impl Rules {
    pub fn engine_flag(self) -> &'static str {
        match self {
            Rules::Chinese => "--chinese-rules",
            Rules::Japanese => "--japanese-rules",
        }
    }

    /// The spelling used in the `RU[..]` property of a record.
    pub fn record_name(self) -> &'static str {
        match self {
            Rules::Chinese => "Chinese",
            Rules::Japanese => "Japanese",
        }
    }
}

impl FromStr for Rules {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("chinese") {
            Ok(Rules::Chinese)
        } else if s.eq_ignore_ascii_case("japanese") {
            Ok(Rules::Japanese)
        } else {
            Err(OptionsError::InvalidRules(String::from(s)))
        }
    }
}

/// White's compensation: a whole number of points plus half a point, so that
/// games cannot end in a tie.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Komi {
    whole_points: u8,
}

impl Komi {
    pub fn from_whole_points(whole_points: u8) -> Result<Self, OptionsError> {
        if whole_points > MAX_KOMI_POINTS {
            return Err(OptionsError::InvalidKomi(format!("{}.5", whole_points)));
        }
        Ok(Self { whole_points })
    }

    pub fn whole_points(self) -> u8 {
        self.whole_points
    }

    pub fn value(self) -> f64 {
        f64::from(self.whole_points) + 0.5
    }
}

impl std::fmt::Display for Komi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.5", self.whole_points)
    }
}

impl TryFrom<f64> for Komi {
    type Error = OptionsError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let whole = value - 0.5;
        if !whole.is_finite() || whole < 0.0 || whole.fract() != 0.0 {
            return Err(OptionsError::InvalidKomi(value.to_string()));
        }
        if whole > f64::from(MAX_KOMI_POINTS) {
            return Err(OptionsError::InvalidKomi(value.to_string()));
        }
        Self::from_whole_points(whole as u8)
    }
}

impl From<Komi> for f64 {
    fn from(komi: Komi) -> f64 {
        komi.value()
    }
}

impl FromStr for Komi {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| OptionsError::InvalidKomi(String::from(s)))?;
        Komi::try_from(value)
    }
}

/// The configuration of one game, as handed to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    pub board_size: usize,
    /// The color of the person playing against the engine.
    pub color: Color,
    pub handicap: u8,
    pub komi: Komi,
    /// The engine's playing strength.
    pub level: u8,
    pub rules: Rules,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            board_size: 17,
            color: Color::Black,
            handicap: 0,
            komi: Komi { whole_points: 6 },
            level: 1,
            rules: Rules::Chinese,
        }
    }
}

impl GameOptions {
    pub fn new(
        board_size: usize,
        color: Color,
        handicap: u8,
        komi: Komi,
        level: u8,
        rules: Rules,
    ) -> Result<Self, OptionsError> {
        let options = Self {
            board_size,
            color,
            handicap,
            komi,
            level,
            rules,
        };
        options.validate()?;
        Ok(options)
    }

    /// Checks that every field is one of the allowed values.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !VALID_BOARD_SIZES.contains(&self.board_size) {
            return Err(OptionsError::InvalidBoardSize(self.board_size.to_string()));
        }
        if self.handicap > MAX_HANDICAP {
            return Err(OptionsError::InvalidHandicap(self.handicap.to_string()));
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.level) {
            return Err(OptionsError::InvalidLevel(self.level.to_string()));
        }
        // Komi and rules can only hold valid values
        Ok(())
    }

    /// The engine's command line for an interactive ASCII session.
    ///
    /// With `record_path`, the engine loads the game from that file.
    pub fn engine_args(&self, record_path: Option<&Path>) -> Vec<OsString> {
        let board_size = self.board_size.to_string();
        let handicap = self.handicap.to_string();
        let komi = self.komi.to_string();
        let level = self.level.to_string();
        let flags: [&str; 19] = [
            "--mode",
            "ascii",
            "--boardsize",
            &board_size,
            "--color",
            self.color.as_str(),
            "--handicap",
            &handicap,
            "--komi",
            &komi,
            "--level",
            &level,
            "--max-level",
            &level,
            self.rules.engine_flag(),
            "--clock",
            CLOCK_BUDGET,
            "--autolevel",
            "--quiet",
        ];
        let mut args: Vec<OsString> = flags.into_iter().map(OsString::from).collect();

        if let Some(path) = record_path {
            args.push(OsString::from("-l"));
            args.push(path.as_os_str().to_owned());
        }
        args
    }
}

/// The engine's command line for estimating the score of a saved game.
pub fn score_estimate_args(record_path: &Path) -> Vec<OsString> {
    vec![
        OsString::from("--score"),
        OsString::from("estimate"),
        OsString::from("-l"),
        record_path.as_os_str().to_owned(),
    ]
}
