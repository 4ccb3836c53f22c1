use std::sync::mpsc::{self, Sender};
use std::thread;

use log::{error, info};
use rodio::{OutputStream, Sink};

use super::source::SessionSource;
use crate::error::PlaybackError;

/// Narrow interface to the audio output device.
///
/// Exactly one session writes to the sink at a time (enforced by the
/// playback controller). `AudioOutput` is the rodio-backed implementation;
/// controller tests substitute a scripted double.
pub trait OutputSink: Send + Sync {
    /// Hand a session stream to the device and start playing it.
    fn play(&self, source: SessionSource) -> Result<(), PlaybackError>;

    /// Silence the device immediately, discarding anything still queued.
    /// Returns only once the device has actually been cleared, so callers
    /// can rely on no trailing audio after this call.
    fn clear(&self) -> Result<(), PlaybackError>;
}

enum OutputCommand {
    Play {
        source: SessionSource,
        ack: Sender<Result<(), String>>,
    },
    Clear {
        ack: Sender<()>,
    },
}

/// rodio-backed audio output.
///
/// The rodio output stream handle is not `Send`, so it lives on a dedicated
/// audio-engine thread driven by a command channel. Device setup happens
/// once, at `init`; a setup failure is reported there and playback never
/// starts.
pub struct AudioOutput {
    tx: Sender<OutputCommand>,
}

impl AudioOutput {
    pub fn init() -> Result<Self, PlaybackError> {
        let (tx, rx) = mpsc::channel::<OutputCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<(), String>>();

        thread::Builder::new()
            .name("audio-engine".to_string())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(err) => {
                        let _ = init_tx.send(Err(err.to_string()));
                        return;
                    }
                };
                let _ = init_tx.send(Ok(()));

                let mut sink: Option<Sink> = None;
                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        OutputCommand::Play { source, ack } => {
                            // A stopped sink stays stopped; build a fresh one
                            // per session.
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            let result = match Sink::try_new(&handle) {
                                Ok(new_sink) => {
                                    new_sink.append(source);
                                    sink = Some(new_sink);
                                    Ok(())
                                }
                                Err(err) => Err(err.to_string()),
                            };
                            let _ = ack.send(result);
                        }
                        OutputCommand::Clear { ack } => {
                            if let Some(old) = sink.take() {
                                old.stop();
                            }
                            let _ = ack.send(());
                        }
                    }
                }
                info!("audio-engine thread shutting down");
            })
            .map_err(|err| PlaybackError::DeviceInit(err.to_string()))?;

        match init_rx.recv() {
            Ok(Ok(())) => Ok(Self { tx }),
            Ok(Err(err)) => Err(PlaybackError::DeviceInit(err)),
            Err(_) => Err(PlaybackError::DeviceInit(
                "audio-engine thread exited during setup".to_string(),
            )),
        }
    }
}

impl OutputSink for AudioOutput {
    fn play(&self, source: SessionSource) -> Result<(), PlaybackError> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.tx
            .send(OutputCommand::Play { source, ack: ack_tx })
            .map_err(|err| PlaybackError::OutputUnavailable(err.to_string()))?;
        match ack_rx.recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                error!("audio sink setup failed: {err}");
                Err(PlaybackError::DeviceInit(err))
            }
            Err(err) => Err(PlaybackError::OutputUnavailable(err.to_string())),
        }
    }

    fn clear(&self) -> Result<(), PlaybackError> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.tx
            .send(OutputCommand::Clear { ack: ack_tx })
            .map_err(|err| PlaybackError::OutputUnavailable(err.to_string()))?;
        ack_rx
            .recv()
            .map_err(|err| PlaybackError::OutputUnavailable(err.to_string()))
    }
}
