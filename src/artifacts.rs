//! Persistence of generated audio and cue artifacts.

use std::io;
use std::path::{Path, PathBuf};

use crate::config::OutputConfig;
use crate::error::Result;

/// Destination paths for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub audio: PathBuf,
    pub cues: PathBuf,
}

impl From<&OutputConfig> for ArtifactPaths {
    fn from(config: &OutputConfig) -> Self {
        Self {
            audio: config.audio_path.clone(),
            cues: config.cues_path.clone(),
        }
    }
}

/// Write `content` to `path` through a sibling temp file and a rename, so
/// readers only ever see the previous or the complete new file.
///
/// # Errors
///
/// Returns an error if the directory, temp file or rename fails. The temp
/// file is removed on failure.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let tmp_path = stage(path, content)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

/// Replace the audio and cue artifacts of one generation as a pair.
///
/// Both files are staged before either target changes. If the cue rename
/// fails after the audio was swapped in, the previous audio is restored (or
/// the new one removed when there was none), so readers see the old pair or
/// the new pair, never a mix.
///
/// # Errors
///
/// Returns the first staging, backup or rename failure. Temp and backup files
/// are removed on every path.
pub fn write_pair_atomic(paths: &ArtifactPaths, audio: &[u8], cues: &[u8]) -> Result<()> {
    let audio_tmp = stage(&paths.audio, audio)?;
    let cues_tmp = match stage(&paths.cues, cues) {
        Ok(tmp) => tmp,
        Err(e) => {
            let _ = std::fs::remove_file(&audio_tmp);
            return Err(e);
        }
    };

    let backup = sibling(&paths.audio, "bak");
    let _ = std::fs::remove_file(&backup);
    let had_audio = match std::fs::hard_link(&paths.audio, &backup) {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            discard(&[&audio_tmp, &cues_tmp]);
            return Err(e.into());
        }
    };

    if let Err(e) = std::fs::rename(&audio_tmp, &paths.audio) {
        discard(&[&audio_tmp, &cues_tmp, &backup]);
        return Err(e.into());
    }
    if let Err(e) = std::fs::rename(&cues_tmp, &paths.cues) {
        if had_audio {
            let _ = std::fs::rename(&backup, &paths.audio);
        } else {
            let _ = std::fs::remove_file(&paths.audio);
        }
        discard(&[&cues_tmp, &backup]);
        return Err(e.into());
    }
    discard(&[&backup]);
    Ok(())
}

/// Async wrapper over [`write_pair_atomic`] for use inside the tokio runtime.
///
/// # Errors
///
/// Same as [`write_pair_atomic`], plus a join failure of the blocking task.
pub async fn write_pair_atomic_async(
    paths: ArtifactPaths,
    audio: Vec<u8>,
    cues: Vec<u8>,
) -> Result<()> {
    tokio::task::spawn_blocking(move || write_pair_atomic(&paths, &audio, &cues))
        .await
        .map_err(|e| io::Error::other(format!("artifact writer task failed: {e}")))?
}

/// Write `content` to a temp sibling of `path`, creating parent directories.
fn stage(path: &Path, content: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = sibling(path, "tmp");
    if let Err(e) = std::fs::write(&tmp_path, content) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(tmp_path)
}

fn discard<P: AsRef<Path>>(paths: &[P]) {
    for path in paths {
        let _ = std::fs::remove_file(path);
    }
}

fn sibling(path: &Path, tag: &str) -> PathBuf {
    let name = format!(
        ".{}.{tag}-{}",
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("artifact"),
        std::process::id()
    );
    path.parent()
        .map(|p| p.join(&name))
        .unwrap_or_else(|| PathBuf::from(&name))
}
