//! Named save games on disk.
//!
//! One JSON document per game, `<dir>/<name>.json`:
//!
//! ```json
//! { "format": "chess-engine-save", "version": 1, "current_team": "white",
//!   "squares": [[{"team": "white", "kind": "rook", "has_moved": false}, null, ...], ...] }
//! ```
//!
//! `squares` is indexed `[x][y]` like the board. The header is checked before the body so a
//! file from another program or a future version is reported as incompatible, not as garbage.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::chess::board::Board;
use crate::chess::piece::{Piece, PieceKind, Team};
use crate::core::square::Square;
use crate::game::GameState;

pub const SAVE_FORMAT: &str = "chess-engine-save";
pub const FORMAT_VERSION: u32 = 1;
const SAVE_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("incompatible save: format '{format}' version {version}")]
    Incompatible { format: String, version: u32 },
    #[error("invalid game name '{0}'")]
    InvalidName(String),
    #[error("save holds an impossible position: {reason}")]
    InvalidPosition { reason: String },
}

impl SaveError {
    fn io(path: &Path, source: io::Error) -> Self {
        SaveError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SavedPiece {
    team: Team,
    kind: PieceKind,
    #[serde(default)]
    has_moved: bool,
}

#[derive(Debug, Deserialize)]
struct SaveHeader {
    format: String,
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    format: String,
    version: u32,
    current_team: Team,
    squares: [[Option<SavedPiece>; 8]; 8],
}

impl SaveFile {
    fn from_state(state: &GameState) -> Self {
        let mut squares = [[None; 8]; 8];
        for (sq, piece) in state.board.pieces() {
            squares[sq.x() as usize][sq.y() as usize] = Some(SavedPiece {
                team: piece.team(),
                kind: piece.kind(),
                has_moved: piece.has_moved(),
            });
        }
        Self {
            format: SAVE_FORMAT.to_string(),
            version: FORMAT_VERSION,
            current_team: state.current_team,
            squares,
        }
    }

    fn into_state(self) -> Result<GameState, SaveError> {
        let mut board = Board::empty();
        for (x, file) in self.squares.iter().enumerate() {
            for (y, saved) in file.iter().enumerate() {
                if let (Some(p), Some(sq)) = (saved, Square::new(x as i32, y as i32)) {
                    board.set(sq, Some(Piece::with_moved(p.team, p.kind, p.has_moved)));
                }
            }
        }
        check_position(&board)?;
        Ok(GameState::new(board, self.current_team))
    }
}

/// A loaded position must be one play can reach: one king per team, and no pawn on the first
/// or last rank (saving is refused while a promotion is pending).
fn check_position(board: &Board) -> Result<(), SaveError> {
    for team in [Team::White, Team::Black] {
        let kings = board
            .pieces()
            .filter(|(_, p)| p.team() == team && p.kind() == PieceKind::King)
            .count();
        if kings != 1 {
            return Err(SaveError::InvalidPosition {
                reason: format!("{team} has {kings} kings (expected 1)"),
            });
        }
    }

    if let Some((sq, p)) = board
        .pieces()
        .find(|(sq, p)| p.kind() == PieceKind::Pawn && (sq.y() == 0 || sq.y() == 7))
    {
        return Err(SaveError::InvalidPosition {
            reason: format!("{p} on {sq}"),
        });
    }
    Ok(())
}

/// Serialize a game to the save document.
pub fn encode(state: &GameState) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(&SaveFile::from_state(state))?)
}

/// Parse a save document.
pub fn decode(text: &str) -> Result<GameState, SaveError> {
    let header: SaveHeader = serde_json::from_str(text)?;
    if header.format != SAVE_FORMAT || header.version != FORMAT_VERSION {
        return Err(SaveError::Incompatible {
            format: header.format,
            version: header.version,
        });
    }
    let file: SaveFile = serde_json::from_str(text)?;
    file.into_state()
}

/// Game names become file names, so they must be usable as one.
pub fn validate_name(name: &str) -> Result<(), SaveError> {
    let invalid = name.trim().is_empty()
        || name.starts_with('.')
        || name
            .chars()
            .any(|c| c == '/' || c == '\\' || c == ':' || c.is_control());
    if invalid {
        Err(SaveError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// A directory of named saves.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// The directory is created lazily, on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf, SaveError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{SAVE_EXTENSION}")))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// True iff `name` is valid and not taken.
    pub fn is_name_available(&self, name: &str) -> bool {
        validate_name(name).is_ok() && !self.exists(name)
    }

    /// Names of all saved games, sorted.
    pub fn list_games(&self) -> Result<Vec<String>, SaveError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(SaveError::io(&self.dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| SaveError::io(&self.dir, e))?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn save(&self, name: &str, state: &GameState) -> Result<(), SaveError> {
        let path = self.path_for(name)?;
        let text = encode(state)?;

        fs::create_dir_all(&self.dir).map_err(|e| SaveError::io(&self.dir, e))?;
        let tmp = path.with_extension(format!("{SAVE_EXTENSION}.tmp"));
        let mut f = fs::File::create(&tmp).map_err(|e| SaveError::io(&tmp, e))?;
        f.write_all(text.as_bytes())
            .and_then(|_| f.sync_all())
            .map_err(|e| SaveError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| SaveError::io(&path, e))?;

        info!(game = name, path = %path.display(), "game saved");
        Ok(())
    }

    /// `Ok(None)` if there is no save under `name`.
    pub fn load(&self, name: &str) -> Result<Option<GameState>, SaveError> {
        let path = self.path_for(name)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SaveError::io(&path, e)),
        };
        match decode(&text) {
            Ok(state) => {
                info!(game = name, "game loaded");
                Ok(Some(state))
            }
            Err(e) => {
                warn!(game = name, path = %path.display(), error = %e, "rejected save file");
                Err(e)
            }
        }
    }

    /// Remove a save. Returns `false` if there was none.
    pub fn delete(&self, name: &str) -> Result<bool, SaveError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(game = name, "save deleted");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SaveError::io(&path, e)),
        }
    }
}
