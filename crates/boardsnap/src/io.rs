//! JSON configuration and report helpers for the command-line tool.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::core::{CornerSet, FitPolicy, ImageSize, PixelRounding, ViewSize, ViewTransform};
use crate::fen::{FenDefaults, Position};
use crate::session::EditorSession;

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// On-screen view the photo is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub size: ViewSize,
    #[serde(default)]
    pub fit: FitPolicy,
}

/// Session configuration: photo size, initial outline, view and FEN defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapConfig {
    #[serde(default)]
    pub image: Option<ImageSize>,
    /// Initial outline; the 10% inset when absent.
    #[serde(default)]
    pub corners: Option<CornerSet>,
    #[serde(default)]
    pub view: Option<ViewConfig>,
    #[serde(default)]
    pub rounding: PixelRounding,
    #[serde(default)]
    pub fen_defaults: FenDefaults,
}

impl SnapConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// View transform for the configured view, if both view and photo are known.
    pub fn view_transform(&self) -> Option<ViewTransform> {
        let view = self.view?;
        let image = self.image?;
        Some(ViewTransform::new(view.size, image, view.fit))
    }

    /// Editor session seeded with `position` and the configured photo and outline.
    pub fn build_session(&self, position: Position) -> EditorSession {
        let mut session = EditorSession::new(position).with_fen_defaults(self.fen_defaults);
        if let Some(image) = self.image {
            session.capture_photo(image);
        }
        if let Some(corners) = self.corners {
            for (role, p) in crate::core::CornerRole::ALL.into_iter().zip(*corners.points()) {
                session.set_corner(role, p);
            }
        }
        session
    }
}

/// Summary of one FEN as printed by the `fen` subcommand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FenReport {
    pub input: String,
    /// Canonical re-encoding of the input.
    pub fen: String,
    pub pieces: usize,
    pub white_kings: usize,
    pub black_kings: usize,
    /// King diagnostics; empty when the position can be evaluated.
    #[serde(default)]
    pub problems: Vec<String>,
}

impl FenReport {
    pub fn new(input: &str, position: &Position) -> Self {
        let (white_kings, black_kings) = position.board.count_kings();
        let problems = match crate::fen::validate_kings(&position.board) {
            Ok(()) => Vec::new(),
            Err(e) => e.diagnostics(),
        };
        Self {
            input: input.to_string(),
            fen: position.fen(),
            pieces: position.board.pieces().count(),
            white_kings,
            black_kings,
            problems,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
