use crate::{Color, GameOptions, GameResult, Komi, OptionsError, Rules};

/// Start of the comment this crate writes into the root node of every record.
pub const MARKER: &str = "C[VERSION";
/// Version of the key/value layout inside the marker comment.
pub const FORMAT_VERSION: &str = "1.0";
/// Comment the engine attaches to nodes it has taken back.
pub const UNDONE_MARKER: &str = "C[undone]";
const RESULT_KEY: &str = "RE[";

/// The marker comment recording the player's color, e.g.
/// `C[VERSION="1.0" MODE="AI" COLOR="black"]`.
pub fn marker_comment(color: Color) -> String {
    format!(
        "C[VERSION=\"{}\" MODE=\"AI\" COLOR=\"{}\"]",
        FORMAT_VERSION, color
    )
}

/// Writes the options into the root node of an otherwise empty record.
pub fn encode_options(options: &GameOptions) -> String {
    format!(
        "(;GM[1]FF[4]SZ[{}]HA[{}]KM[{}]RU[{}]GN[GNU Go level {}]{})",
        options.board_size,
        options.handicap,
        options.komi,
        options.rules.record_name(),
        options.level,
        marker_comment(options.color)
    )
}

/// A read-only view of a game record.
///
/// The text is split at every `;`. Segment 0 is the `(` before the first
/// node, segment 1 is the root node with the game-wide properties, and every
/// later segment is one move.
#[derive(Copy, Clone, Debug)]
pub struct GameRecord<'a> {
    text: &'a str,
}

impl<'a> GameRecord<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn segments(&self) -> impl Iterator<Item = &'a str> {
        self.text.split(';')
    }

    pub fn root_node(&self) -> Option<&'a str> {
        self.segments().nth(1)
    }

    /// The text between the first `start` in the root node and the next `end`.
    fn root_value(&self, start: &str, end: &str) -> Option<&'a str> {
        let (_, after_start) = self.root_node()?.split_once(start)?;
        let (value, _) = after_start.split_once(end)?;
        Some(value)
    }

    /// A bracketed property of the root node, e.g. `SZ` in `SZ[19]`.
    pub fn property(&self, key: &str) -> Option<&'a str> {
        self.root_value(&format!("{}[", key), "]")
    }

    /// A `KEY="value"` pair inside the marker comment.
    pub fn comment_value(&self, key: &str) -> Option<&'a str> {
        self.root_value(&format!("{}=\"", key), "\"")
    }

    /// A word following `key` in free text, up to the closing bracket. The
    /// engine names itself e.g. `GN[GNU Go 3.8 Random Seed 1557726730 level 6]`.
    pub fn annotation_value(&self, key: &str) -> Option<&'a str> {
        self.root_value(&format!("{} ", key), "]")
    }

    pub fn decode_options(&self) -> Result<GameOptions, OptionsError> {
        let board_size = self
            .property("SZ")
            .ok_or(OptionsError::MissingKey("the board size (SZ)"))?;
        let board_size = board_size
            .trim()
            .parse()
            .map_err(|_| OptionsError::InvalidBoardSize(String::from(board_size)))?;

        let handicap = self
            .property("HA")
            .ok_or(OptionsError::MissingKey("the handicap (HA)"))?;
        let handicap = handicap
            .trim()
            .parse()
            .map_err(|_| OptionsError::InvalidHandicap(String::from(handicap)))?;

        let komi: Komi = self
            .property("KM")
            .ok_or(OptionsError::MissingKey("the compensation (KM)"))?
            .parse()?;

        let rules: Rules = self
            .property("RU")
            .ok_or(OptionsError::MissingKey("the rules (RU)"))?
            .trim()
            .parse()?;

        let level = self
            .annotation_value("level")
            .ok_or(OptionsError::MissingKey("the engine level"))?;
        let level = level
            .trim()
            .parse()
            .map_err(|_| OptionsError::InvalidLevel(String::from(level)))?;

        let color: Color = self
            .comment_value("COLOR")
            .ok_or(OptionsError::MissingKey("the player's color"))?
            .parse()?;

        GameOptions::new(board_size, color, handicap, komi, level, rules)
    }

    /// The final result, if the engine has written one.
    pub fn result(&self) -> Option<GameResult> {
        let (_, after_key) = self.text.split_once(RESULT_KEY)?;
        let (token, _) = after_key.split_once(']')?;
        GameResult::parse_token(token, true)
    }

    pub fn is_game_over(&self) -> bool {
        self.text.contains(RESULT_KEY)
    }

    /// Whether the engine took back exactly two moves.
    pub fn has_undone_moves(&self) -> bool {
        self.segments()
            .filter(|segment| segment.contains(UNDONE_MARKER))
            .count()
            == 2
    }

    /// Drops every node the engine marked as undone.
    pub fn strip_undone_moves(&self) -> String {
        let segments: Vec<&str> = self.segments().collect();
        let mut stripped = segments
            .iter()
            .filter(|segment| !segment.contains(UNDONE_MARKER))
            .copied()
            .collect::<Vec<&str>>()
            .join(";");
        // The last node carries the parentheses that close the game tree
        if let Some(last) = segments.last().filter(|s| s.contains(UNDONE_MARKER)) {
            let last = last.trim_end();
            stripped.push_str(&last[last.trim_end_matches(')').len()..]);
        }
        stripped
    }

    /// Removes line breaks and adds the marker comment to the root node.
    ///
    /// Nothing is added if the marker already appears anywhere in the text,
    /// not only in the root node.
    pub fn with_marker_comment(&self, color: Color) -> String {
        let clean: String = self.text.chars().filter(|&c| c != '\n').collect();
        let clean = clean.trim();
        if clean.contains(MARKER) {
            return String::from(clean);
        }
        let mut segments: Vec<String> = clean.split(';').map(String::from).collect();
        match segments.get_mut(1) {
            Some(root) => root.insert_str(0, &marker_comment(color)),
            None => return String::from(clean),
        }
        segments.join(";")
    }
}
