use anyhow::{Context, Result};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::clip::{AssetBundle, SoundClip};
use crate::game::GameEvent;

/// Open audio device. The stream must outlive every sink played on it.
struct AudioOutput {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Plays the matching clip, fire-and-forget, for each game event.
///
/// Without a bundle, or without an output device, every cue is silent.
pub struct CuePlayer {
    bundle: Option<AssetBundle>,
    output: Option<AudioOutput>,
}

impl CuePlayer {
    /// Open the default output device when there is something to play
    pub fn new(bundle: Option<AssetBundle>) -> Self {
        let output = match &bundle {
            Some(_) => match OutputStream::try_default() {
                Ok((stream, handle)) => Some(AudioOutput {
                    _stream: stream,
                    handle,
                }),
                Err(err) => {
                    warn!(%err, "no audio output device, cues disabled");
                    None
                }
            },
            None => None,
        };
        Self { bundle, output }
    }

    fn clip_for(&self, event: GameEvent) -> Option<&SoundClip> {
        let bundle = self.bundle.as_ref()?;
        Some(match event {
            GameEvent::AteFood => &bundle.eat,
            GameEvent::Collision(_) => &bundle.game_over,
        })
    }

    pub fn play(&self, event: GameEvent) -> Result<()> {
        let (Some(clip), Some(output)) = (self.clip_for(event), self.output.as_ref()) else {
            return Ok(());
        };
        debug!(clip = %clip.name, ?event, "cue");

        let source = clip
            .decoder()
            .with_context(|| format!("Failed to decode {}", clip.name))?;
        let sink = Sink::try_new(&output.handle).context("Failed to open audio sink")?;
        sink.append(source);
        sink.detach();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::clip::{EAT_CLIP, GAME_OVER_CLIP, tests::asset_dir};
    use crate::game::CollisionType;

    fn deviceless(bundle: Option<AssetBundle>) -> CuePlayer {
        CuePlayer {
            bundle,
            output: None,
        }
    }

    #[test]
    fn test_each_event_has_its_own_clip() {
        let dir = asset_dir();
        let player = deviceless(Some(AssetBundle::load(dir.path()).unwrap()));

        let eat = player.clip_for(GameEvent::AteFood).unwrap();
        assert_eq!(eat.name, EAT_CLIP);

        for collision in [CollisionType::Wall, CollisionType::SelfCollision] {
            let clip = player.clip_for(GameEvent::Collision(collision)).unwrap();
            assert_eq!(clip.name, GAME_OVER_CLIP);
        }
    }

    #[test]
    fn test_silent_without_bundle() {
        let player = CuePlayer::new(None);
        assert!(player.output.is_none());
        assert!(player.clip_for(GameEvent::AteFood).is_none());
        player.play(GameEvent::AteFood).unwrap();
    }

    #[test]
    fn test_silent_without_device() {
        let dir = asset_dir();
        let player = deviceless(Some(AssetBundle::load(dir.path()).unwrap()));
        player.play(GameEvent::AteFood).unwrap();
        player
            .play(GameEvent::Collision(CollisionType::Wall))
            .unwrap();
    }
}
