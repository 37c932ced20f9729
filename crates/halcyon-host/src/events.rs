//! Outbound event dispatch.
//!
//! Player events are forwarded to the host UI fire-and-forget, with the
//! listener's `Result` acting as the delivery acknowledgment. A rejected
//! delivery is logged and dropped; it never stops the dispatch loop.

use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use halcyon_core::{Error, PlayerState, Result};
use halcyon_player::PlayerEvent;
use tracing::{debug, warn};

/// Event as it appears on the host wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The engine confirmed a transition to this window index.
    AudioChanged(i64),
    /// The playback state machine transitioned.
    UpdateState(PlayerState),
}

impl From<PlayerEvent> for HostEvent {
    fn from(event: PlayerEvent) -> Self {
        match event {
            PlayerEvent::TrackChanged(index) => Self::AudioChanged(index),
            PlayerEvent::StateChanged(state) => Self::UpdateState(state),
        }
    }
}

/// Receiving side of the host channel.
pub trait HostListener: Send {
    fn audio_changed(&self, pos: i64) -> Result<()>;
    fn update_state(&self, state: PlayerState) -> Result<()>;
}

/// Forwards player events to a [`HostListener`] on its own thread.
///
/// The loop ends when the player side closes the event channel; `join`
/// waits for the last delivery to finish.
pub struct EventDispatcher {
    worker: Option<JoinHandle<()>>,
}

impl EventDispatcher {
    pub fn spawn(
        events: Receiver<PlayerEvent>,
        listener: Box<dyn HostListener>,
    ) -> Result<Self> {
        let worker = std::thread::Builder::new()
            .name("halcyon-host-events".to_owned())
            .spawn(move || {
                for event in &events {
                    Self::deliver(listener.as_ref(), event.into());
                }
                debug!("event channel closed, dispatcher stopping");
            })
            .map_err(|e| Error::Internal(format!("failed to spawn dispatcher thread: {e}")))?;

        Ok(Self {
            worker: Some(worker),
        })
    }

    /// Wait for the dispatch loop to drain and stop.
    pub fn join(mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }

    fn deliver(listener: &dyn HostListener, event: HostEvent) {
        let ack = match event {
            HostEvent::AudioChanged(pos) => listener.audio_changed(pos),
            HostEvent::UpdateState(state) => listener.update_state(state),
        };
        if let Err(err) = ack {
            warn!(?event, %err, "host rejected event delivery");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Tests use unwrap for brevity

    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingListener {
        events: Arc<Mutex<Vec<HostEvent>>>,
        reject: bool,
    }

    impl HostListener for RecordingListener {
        fn audio_changed(&self, pos: i64) -> Result<()> {
            self.events.lock().push(HostEvent::AudioChanged(pos));
            if self.reject {
                return Err(Error::ChannelUnavailable("host gone".into()));
            }
            Ok(())
        }

        fn update_state(&self, state: PlayerState) -> Result<()> {
            self.events.lock().push(HostEvent::UpdateState(state));
            Ok(())
        }
    }

    #[test]
    fn test_events_are_forwarded_in_order() {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let listener = RecordingListener {
            events: recorded.clone(),
            reject: false,
        };
        let (tx, rx) = crossbeam_channel::unbounded();

        let dispatcher = EventDispatcher::spawn(rx, Box::new(listener)).unwrap();
        tx.send(PlayerEvent::TrackChanged(2)).unwrap();
        tx.send(PlayerEvent::StateChanged(PlayerState::Ready)).unwrap();
        drop(tx);
        dispatcher.join();

        assert_eq!(
            *recorded.lock(),
            [
                HostEvent::AudioChanged(2),
                HostEvent::UpdateState(PlayerState::Ready),
            ]
        );
    }

    #[test]
    fn test_rejected_delivery_does_not_stop_the_loop() {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let listener = RecordingListener {
            events: recorded.clone(),
            reject: true,
        };
        let (tx, rx) = crossbeam_channel::unbounded();

        let dispatcher = EventDispatcher::spawn(rx, Box::new(listener)).unwrap();
        tx.send(PlayerEvent::TrackChanged(0)).unwrap();
        tx.send(PlayerEvent::TrackChanged(1)).unwrap();
        drop(tx);
        dispatcher.join();

        assert_eq!(recorded.lock().len(), 2);
    }
}
