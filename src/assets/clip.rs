use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rodio::{Decoder, decoder::DecoderError};
use thiserror::Error;

/// File name of the clip played when food is eaten
pub const EAT_CLIP: &str = "eat.wav";
/// File name of the clip played on a collision
pub const GAME_OVER_CLIP: &str = "gameover.wav";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("asset {} is not a playable WAV clip", .path.display())]
    NotWave {
        path: PathBuf,
        #[source]
        source: DecoderError,
    },
}

/// A WAV clip held in memory, decoded afresh for every playback
#[derive(Debug, Clone)]
pub struct SoundClip {
    pub name: String,
    bytes: Arc<[u8]>,
}

impl SoundClip {
    /// Read and decode-check a WAV file
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let bytes: Arc<[u8]> = std::fs::read(path)
            .map_err(|source| AssetError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .into();

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let clip = Self { name, bytes };

        clip.decoder().map_err(|source| AssetError::NotWave {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(clip)
    }

    /// A fresh source positioned at the start of the clip
    pub fn decoder(&self) -> Result<Decoder<Cursor<Arc<[u8]>>>, DecoderError> {
        Decoder::new_wav(Cursor::new(Arc::clone(&self.bytes)))
    }
}

/// Every asset the game shell needs, loaded together
#[derive(Debug, Clone)]
pub struct AssetBundle {
    pub eat: SoundClip,
    pub game_over: SoundClip,
}

impl AssetBundle {
    /// Load `eat.wav` and `gameover.wav` from `dir`. The first failure wins.
    pub fn load(dir: &Path) -> Result<Self, AssetError> {
        Ok(Self {
            eat: SoundClip::load(&dir.join(EAT_CLIP))?,
            game_over: SoundClip::load(&dir.join(GAME_OVER_CLIP))?,
        })
    }
}
