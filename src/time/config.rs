//! Tempo persistence — YAML load/save for a tempo profile.

use std::io;
use std::path::Path;

use super::tempo::Tempo;

/// Load a tempo from a YAML file. Returns the default tempo if the file
/// doesn't exist.
pub fn load_tempo(path: &Path) -> Result<Tempo, io::Error> {
    if !path.exists() {
        return Ok(Tempo::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Save a tempo to a YAML file, creating parent directories as needed.
pub fn save_tempo(path: &Path, tempo: &Tempo) -> Result<(), io::Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(tempo).map_err(io::Error::other)?;
    std::fs::write(path, yaml)
}
