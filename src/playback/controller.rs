use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::audio::{OutputSink, SessionSource, StereoMixer, SweepingSine};
use crate::error::PlaybackError;
use crate::presets::PresetCatalog;

/// Lifecycle of the playback controller, observable through
/// [`PlaybackController::subscribe`] so a frontend can show or hide its
/// "now playing" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    /// A stop request is in flight; the sink has been or is being silenced.
    Stopping,
}

struct PlaybackSession {
    id: Uuid,
    cancel: CancellationToken,
    monitor: JoinHandle<()>,
}

/// Owns the playback lifecycle: start a session, run it to completion on
/// the audio thread, or tear it down on a stop request.
///
/// At most one session is active at a time; a start while playing is
/// rejected rather than silently abandoning the running render task. Each
/// session gets its own cancellation token, so a stale stop can never leak
/// into a later session.
pub struct PlaybackController {
    sink: Arc<dyn OutputSink>,
    catalog: PresetCatalog,
    state_tx: Arc<watch::Sender<PlaybackState>>,
    session: Mutex<Option<PlaybackSession>>,
}

impl PlaybackController {
    pub fn new(sink: Arc<dyn OutputSink>, catalog: PresetCatalog) -> Self {
        let (state_tx, _) = watch::channel(PlaybackState::Idle);
        Self {
            sink,
            catalog,
            state_tx: Arc::new(state_tx),
            session: Mutex::new(None),
        }
    }

    /// Resolve `preset_name` and start streaming it to the sink. Returns as
    /// soon as the stream is handed over; rendering continues on the audio
    /// thread until the duration's sample budget is exhausted or `stop` is
    /// called.
    pub async fn start(
        &self,
        preset_name: &str,
        duration: Duration,
        sample_rate: u32,
    ) -> Result<Uuid, PlaybackError> {
        // A zero rate or duration yields an empty sample budget and a NaN
        // stream duration downstream; reject both up front.
        if sample_rate == 0 {
            return Err(PlaybackError::InvalidSampleRate { rate: sample_rate });
        }
        if duration.is_zero() {
            return Err(PlaybackError::InvalidDuration {
                seconds: duration.as_secs(),
            });
        }

        let mut session = self.session.lock().await;
        // Same gate the original UI applied through its "now playing"
        // indicator: only an idle controller accepts a start.
        if *self.state_tx.borrow() != PlaybackState::Idle {
            return Err(PlaybackError::AlreadyPlaying);
        }

        let entry = self
            .catalog
            .lookup(preset_name)
            .ok_or_else(|| PlaybackError::UnknownPreset {
                name: preset_name.to_string(),
            })?;

        let total_frames = (duration.as_secs_f64() * sample_rate as f64).round() as u64;
        let left = SweepingSine::new(entry.channels[0], sample_rate, total_frames, 0);
        let right = SweepingSine::new(entry.channels[1], sample_rate, total_frames, 1);
        let mixer = StereoMixer::new(left, right);

        let cancel = CancellationToken::new();
        let (done_tx, mut done_rx) = watch::channel(false);
        let source = SessionSource::new(mixer, sample_rate, total_frames, cancel.clone(), done_tx);

        self.sink.play(source)?;

        let id = Uuid::new_v4();
        info!(
            "session {id}: playing preset {preset_name:?} for {}s at {sample_rate} Hz",
            duration.as_secs()
        );
        self.state_tx.send_replace(PlaybackState::Playing);

        // Two-case wait: natural completion vs cancellation, first one wins.
        let state_tx = Arc::clone(&self.state_tx);
        let token = cancel.clone();
        let monitor = tokio::spawn(async move {
            tokio::select! {
                result = done_rx.wait_for(|done| *done) => {
                    if result.is_ok() {
                        info!("session {id}: completed");
                        state_tx.send_replace(PlaybackState::Idle);
                    }
                    // Err: the stream was dropped without completing; the
                    // stop path owns the state transition.
                }
                _ = token.cancelled() => {
                    info!("session {id}: stop observed");
                }
            }
        });

        *session = Some(PlaybackSession { id, cancel, monitor });
        Ok(id)
    }

    /// Stop the active session, if any. Safe to call while idle (no-op) and
    /// safe to call repeatedly. The sink is silenced before the state
    /// returns to `Idle`, so there is no trailing audio once this resolves.
    pub async fn stop(&self) -> Result<(), PlaybackError> {
        let mut session = self.session.lock().await;
        let Some(current) = session.take() else {
            return Ok(());
        };
        if *self.state_tx.borrow() == PlaybackState::Idle {
            // Session already completed naturally; nothing to silence.
            return Ok(());
        }

        self.state_tx.send_replace(PlaybackState::Stopping);
        self.sink.clear()?;
        current.cancel.cancel();
        let _ = current.monitor.await;
        self.state_tx.send_replace(PlaybackState::Idle);
        info!("session {}: stopped", current.id);
        Ok(())
    }

    pub fn state(&self) -> PlaybackState {
        *self.state_tx.borrow()
    }

    /// Watch channel carrying every state transition.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state_tx.subscribe()
    }

    /// Block the calling task until the controller is idle again; the
    /// run-to-completion path for the CLI.
    pub async fn wait_until_idle(&self) {
        let mut rx = self.state_tx.subscribe();
        let _ = rx.wait_for(|state| *state == PlaybackState::Idle).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use std::thread;

    /// Scripted sink double. `drain` mode consumes the stream on a thread
    /// the way a real device would; `hold` mode keeps it queued so the
    /// session stays active until cleared.
    struct TestSink {
        drain: bool,
        plays: AtomicUsize,
        clears: AtomicUsize,
        held: StdMutex<Option<SessionSource>>,
    }

    impl TestSink {
        fn new(drain: bool) -> Arc<Self> {
            Arc::new(Self {
                drain,
                plays: AtomicUsize::new(0),
                clears: AtomicUsize::new(0),
                held: StdMutex::new(None),
            })
        }
    }

    impl OutputSink for TestSink {
        fn play(&self, source: SessionSource) -> Result<(), PlaybackError> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            if self.drain {
                thread::spawn(move || for _ in source {});
            } else {
                *self.held.lock().unwrap() = Some(source);
            }
            Ok(())
        }

        fn clear(&self) -> Result<(), PlaybackError> {
            self.clears.fetch_add(1, Ordering::SeqCst);
            self.held.lock().unwrap().take();
            Ok(())
        }
    }

    fn controller(sink: &Arc<TestSink>) -> PlaybackController {
        PlaybackController::new(sink.clone(), PresetCatalog::builtin())
    }

    #[tokio::test]
    async fn unknown_preset_leaves_the_sink_untouched() {
        let sink = TestSink::new(false);
        let ctrl = controller(&sink);

        let err = ctrl
            .start("xyz", Duration::from_secs(1), 44100)
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::UnknownPreset { name } if name == "xyz"));
        assert_eq!(sink.plays.load(Ordering::SeqCst), 0);
        assert_eq!(ctrl.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn unplayable_session_parameters_are_rejected() {
        let sink = TestSink::new(false);
        let ctrl = controller(&sink);

        let err = ctrl
            .start("alpha", Duration::from_secs(1), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::InvalidSampleRate { rate: 0 }));

        let err = ctrl
            .start("alpha", Duration::ZERO, 44100)
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::InvalidDuration { .. }));

        assert_eq!(sink.plays.load(Ordering::SeqCst), 0);
        assert_eq!(ctrl.state(), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn session_completes_naturally_and_returns_to_idle() {
        let sink = TestSink::new(true);
        let ctrl = controller(&sink);

        ctrl.start("alpha", Duration::from_millis(50), 8000)
            .await
            .unwrap();

        tokio::time::timeout(Duration::from_secs(5), ctrl.wait_until_idle())
            .await
            .expect("session did not complete");
        assert_eq!(ctrl.state(), PlaybackState::Idle);
        assert_eq!(sink.plays.load(Ordering::SeqCst), 1);
        // Natural completion never clears the sink; the stream just ends,
        // and a stop after the fact finds nothing to silence.
        ctrl.stop().await.unwrap();
        assert_eq!(sink.clears.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_start_is_rejected() {
        let sink = TestSink::new(false);
        let ctrl = controller(&sink);

        ctrl.start("focus", Duration::from_secs(60), 44100)
            .await
            .unwrap();
        assert_eq!(ctrl.state(), PlaybackState::Playing);
        let err = ctrl
            .start("calm", Duration::from_secs(60), 44100)
            .await
            .unwrap_err();
        assert!(matches!(err, PlaybackError::AlreadyPlaying));
        assert_eq!(sink.plays.load(Ordering::SeqCst), 1);

        ctrl.stop().await.unwrap();
    }

    #[tokio::test]
    async fn stop_silences_the_sink_and_is_idempotent() {
        let sink = TestSink::new(false);
        let ctrl = controller(&sink);

        // Stop while idle is an explicit no-op.
        ctrl.stop().await.unwrap();
        assert_eq!(sink.clears.load(Ordering::SeqCst), 0);

        ctrl.start("delta", Duration::from_secs(60), 44100)
            .await
            .unwrap();
        ctrl.stop().await.unwrap();
        assert_eq!(ctrl.state(), PlaybackState::Idle);
        assert_eq!(sink.clears.load(Ordering::SeqCst), 1);

        // A second stop finds no session and touches nothing.
        ctrl.stop().await.unwrap();
        assert_eq!(sink.clears.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn a_new_session_can_start_after_completion() {
        let sink = TestSink::new(true);
        let ctrl = controller(&sink);

        ctrl.start("theta", Duration::from_millis(20), 8000)
            .await
            .unwrap();
        tokio::time::timeout(Duration::from_secs(5), ctrl.wait_until_idle())
            .await
            .expect("session did not complete");

        ctrl.start("gamma", Duration::from_millis(20), 8000)
            .await
            .unwrap();
        assert_eq!(sink.plays.load(Ordering::SeqCst), 2);
        ctrl.stop().await.unwrap();
    }
}
