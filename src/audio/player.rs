use crate::audio::tones::{SAMPLE_RATE, ToneRecipe, render};
use crate::audio::{FeedbackEvent, FeedbackPort};
use crate::error::AudioError;
use crossbeam_channel::{Receiver, Sender};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::collections::HashMap;
use std::thread;

/// Plays cues on a dedicated audio thread. The output stream is not `Send`,
/// so the device is opened and owned by that thread.
pub struct TonePlayer {
    tx: Sender<FeedbackEvent>,
    _worker: thread::JoinHandle<()>,
}

impl TonePlayer {
    pub fn spawn() -> std::io::Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let worker = thread::Builder::new()
            .name("global-explorer::audio".to_string())
            .spawn(move || run(rx))?;

        Ok(Self {
            tx,
            _worker: worker,
        })
    }
}

impl FeedbackPort for TonePlayer {
    fn emit(&self, event: FeedbackEvent) {
        if self.tx.send(event).is_err() {
            tracing::warn!("Audio thread gone, dropping {} cue", event);
        }
    }
}

struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    current: Option<Sink>,
}

impl Output {
    fn open() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::StreamInit(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            current: None,
        })
    }

    /// Stop whatever is still sounding and start the new cue.
    fn play(&mut self, samples: Vec<f32>) -> Result<(), AudioError> {
        if let Some(previous) = self.current.take() {
            previous.stop();
        }
        let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Playback(e.to_string()))?;
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
        sink.play();
        self.current = Some(sink);
        Ok(())
    }
}

fn run(rx: Receiver<FeedbackEvent>) {
    let mut output = match Output::open() {
        Ok(output) => Some(output),
        Err(e) => {
            tracing::warn!("{}; cues will be silent", e);
            None
        }
    };

    let cache: HashMap<FeedbackEvent, Vec<f32>> = [
        FeedbackEvent::Correct,
        FeedbackEvent::Incorrect,
        FeedbackEvent::LevelUp,
        FeedbackEvent::Trophy,
    ]
    .into_iter()
    .map(|event| (event, render(&ToneRecipe::for_event(event), SAMPLE_RATE)))
    .collect();

    // Exits once every sender is dropped
    for event in rx.iter() {
        let Some(out) = output.as_mut() else {
            continue;
        };
        let Some(samples) = cache.get(&event) else {
            continue;
        };
        if let Err(e) = out.play(samples.clone()) {
            tracing::warn!("Failed to play {} cue: {}", event, e);
        }
    }
    tracing::debug!("Audio thread exiting");
}
