use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// One scalar lives on disk: the best score across sessions, as plain text.

fn score_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "flappy-boost").map(|dirs| dirs.data_dir().join("highscore"))
}

/// Missing file, unreadable file, or garbage contents all mean "no high
/// score yet"; startup never fails over this.
pub fn parse_high_score(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

pub fn load_high_score() -> u32 {
    score_path()
        .and_then(|p| fs::read_to_string(p).ok())
        .map(|s| parse_high_score(&s))
        .unwrap_or(0)
}

pub fn save_high_score(score: u32) -> Result<()> {
    let path = score_path().context("no usable data directory")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, score.to_string())?;
    Ok(())
}
