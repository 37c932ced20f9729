//! Inbound command surface.
//!
//! Each host call translates 1:1 into a player command. Transport
//! problems (the worker is gone, so the channel is unusable) surface as
//! `Error::ChannelUnavailable`; everything else a handler can fail with
//! is reported as a structured [`ApiError`] triple, never a raw fault.

use crossbeam_channel::Sender;
use halcyon_core::{ApiError, Error, LoopMode, PlayerStatus, Result, Window};
use halcyon_player::{Player, PlayerCommand};
use tracing::error;

/// Typed handle the host UI talks to.
#[derive(Clone)]
pub struct PlayerHandle {
    commands: Sender<PlayerCommand>,
}

impl PlayerHandle {
    pub fn new(player: &Player) -> Self {
        Self {
            commands: player.commands(),
        }
    }

    /// Build a handle from a raw command sender, for embedders that
    /// route the channel themselves.
    pub const fn from_sender(commands: Sender<PlayerCommand>) -> Self {
        Self { commands }
    }

    pub fn play(&self) -> Result<()> {
        self.send(PlayerCommand::Play)
    }

    pub fn pause(&self) -> Result<()> {
        self.send(PlayerCommand::Pause)
    }

    pub fn seek(&self, position_ms: i64) -> Result<()> {
        self.send(PlayerCommand::Seek(position_ms))
    }

    pub fn skip_to_next(&self) -> Result<()> {
        self.send(PlayerCommand::SkipToNext)
    }

    pub fn skip_to_previous(&self) -> Result<()> {
        self.send(PlayerCommand::SkipToPrevious)
    }

    /// Hand the player a fresh desired window: past tracks plus the
    /// current one, then the upcoming ones.
    pub fn set_audios(&self, previous_urls: &[String], next_urls: &[String]) -> Result<()> {
        self.send(PlayerCommand::SetAudios(Window::from_urls(
            previous_urls,
            next_urls,
        )))
    }

    pub fn set_loop_mode(&self, mode: LoopMode) -> Result<()> {
        self.send(PlayerCommand::SetLoopMode(mode))
    }

    pub fn set_auth_token(&self, token: impl Into<String>) -> Result<()> {
        self.send(PlayerCommand::SetAuthToken(token.into()))
    }

    /// Fresh status snapshot, computed by the worker at the shared
    /// linearization point.
    pub fn fetch_status(&self) -> Result<PlayerStatus> {
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        self.send(PlayerCommand::FetchStatus(reply_tx))?;
        reply_rx
            .recv()
            .map_err(|e| Error::ChannelUnavailable(format!("status reply lost: {e}")))
    }

    fn send(&self, command: PlayerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|e| Error::ChannelUnavailable(format!("player worker gone: {e}")))
    }
}

/// Convert a handler result into the wire-level error triple.
pub fn wrap_api<T>(result: Result<T>) -> std::result::Result<T, ApiError> {
    result.map_err(|err| {
        error!(%err, "command handler failed");
        ApiError::from(err)
    })
}
