use crate::wav::Wav;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

/// Playback cursor over a clip, resampled to the output rate by nearest
/// frame.
pub struct Playback {
    clip: Arc<Wav>,
    output_rate: f64,
    position: Option<f64>,
}

impl Playback {
    pub fn new(clip: Arc<Wav>, output_rate: u32) -> Self {
        Self {
            clip,
            output_rate: output_rate.max(1) as f64,
            position: None,
        }
    }

    /// Restarts from the first frame.
    pub fn start(&mut self) {
        self.position = Some(0.0);
    }

    pub fn is_playing(&self) -> bool {
        self.position.is_some()
    }

    /// Fills one interleaved output frame; silence when idle.
    pub fn next_frame(&mut self, out: &mut [f32]) {
        let Some(pos) = self.position else {
            out.fill(0.0);
            return;
        };
        let frame = pos as usize;
        if frame >= self.clip.frames() {
            self.position = None;
            out.fill(0.0);
            return;
        }
        for (ch, sample) in out.iter_mut().enumerate() {
            *sample = self.clip.sample(frame, ch);
        }
        self.position = Some(pos + self.clip.sample_rate as f64 / self.output_rate);
    }
}

/// Narration clip on the default output device. The stream outputs silence
/// until [`NarrationPlayer::play`] is called.
pub struct NarrationPlayer {
    playback: Arc<Mutex<Playback>>,
    _stream: cpal::Stream,
}

impl NarrationPlayer {
    pub fn start(clip: Wav) -> Option<Self> {
        let host = cpal::default_host();
        let device = host.default_output_device()?;
        let config = device.default_output_config().ok()?;
        let sample_format = config.sample_format();
        let config: cpal::StreamConfig = config.into();
        let playback = Arc::new(Mutex::new(Playback::new(Arc::new(clip), config.sample_rate.0)));

        let err_fn = |err: cpal::StreamError| log::error!("[audio] stream error: {err}");
        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config, Arc::clone(&playback), err_fn)
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config, Arc::clone(&playback), err_fn)
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config, Arc::clone(&playback), err_fn)
            }
            other => {
                log::warn!("[audio] unsupported sample format {other:?}");
                return None;
            }
        }
        .map_err(|e| log::warn!("[audio] failed to build stream: {e}"))
        .ok()?;
        stream
            .play()
            .map_err(|e| log::warn!("[audio] failed to start stream: {e}"))
            .ok()?;
        log::info!(
            "[audio] output {} Hz, {} channel(s)",
            config.sample_rate.0,
            config.channels
        );
        Some(Self {
            playback,
            _stream: stream,
        })
    }

    pub fn play(&self) {
        match self.playback.lock() {
            Ok(mut playback) => playback.start(),
            Err(_) => log::warn!("[audio] playback state poisoned"),
        }
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    playback: Arc<Mutex<Playback>>,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = (config.channels as usize).max(1);
    let mut frame = vec![0.0f32; channels];
    device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            let Ok(mut playback) = playback.lock() else {
                return;
            };
            for out in data.chunks_mut(channels) {
                playback.next_frame(&mut frame);
                for (dst, &src) in out.iter_mut().zip(frame.iter()) {
                    *dst = T::from_sample(src);
                }
            }
        },
        err_fn,
        None,
    )
}
