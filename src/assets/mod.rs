//! Startup assets and the audio cues they back
//!
//! Assets are acquired once, before the terminal is taken over, so a missing
//! or broken file is reported as a startup error instead of a silent round.

pub mod clip;
pub mod cues;

pub use clip::{AssetBundle, AssetError, SoundClip};
pub use cues::CuePlayer;
