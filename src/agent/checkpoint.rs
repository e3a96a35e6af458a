use std::path::{Path, PathBuf};
use std::{error::Error, fmt, fs, io};

const CHECKPOINT_PREFIX: &str = "policy_episode_";
const CHECKPOINT_SUFFIX: &str = ".json";

#[derive(Debug)]
pub enum CheckpointError {
    IoError(io::Error),
    JsonError(serde_json::Error),
}

impl fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckpointError::IoError(e) => write!(f, "I/O error: {}", e),
            CheckpointError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl Error for CheckpointError {}

impl From<io::Error> for CheckpointError {
    fn from(err: io::Error) -> Self {
        CheckpointError::IoError(err)
    }
}

impl From<serde_json::Error> for CheckpointError {
    fn from(err: serde_json::Error) -> Self {
        CheckpointError::JsonError(err)
    }
}

/// File name for a save point; the embedded number is the training episode
/// at save time.
pub fn checkpoint_path(dir: &Path, episode: usize) -> PathBuf {
    dir.join(format!("{}{}{}", CHECKPOINT_PREFIX, episode, CHECKPOINT_SUFFIX))
}

/// Scans `dir` for checkpoint files and returns the one with the highest
/// embedded episode number, or None when no checkpoint exists yet. Files not
/// matching the naming scheme are ignored.
pub fn latest_checkpoint(dir: &Path) -> Result<Option<(PathBuf, usize)>, CheckpointError> {
    if !dir.exists() {
        return Ok(None);
    }

    let mut best: Option<(PathBuf, usize)> = None;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        let episode = match name
            .strip_prefix(CHECKPOINT_PREFIX)
            .and_then(|rest| rest.strip_suffix(CHECKPOINT_SUFFIX))
            .and_then(|digits| digits.parse::<usize>().ok())
        {
            Some(episode) => episode,
            None => continue,
        };

        if best.as_ref().map_or(true, |(_, current)| episode > *current) {
            best = Some((entry.path(), episode));
        }
    }

    Ok(best)
}
