//! RIFF/WAVE reader for 16-bit PCM narration clips.

use nom::{
    bytes::complete::{tag, take},
    multi::many0,
    number::complete::{le_i16, le_u16, le_u32},
    sequence::tuple,
    IResult,
};
use std::time::Duration;
use thiserror::Error;

const FORMAT_PCM: u16 = 1;

#[derive(Debug, Error, PartialEq)]
pub enum WavError {
    #[error("malformed WAV: {0}")]
    Malformed(String),
    #[error("unsupported WAV: {0}")]
    Unsupported(String),
}

/// Decoded clip; `samples` are interleaved by channel.
#[derive(Clone, Debug, PartialEq)]
pub struct Wav {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<i16>,
}

impl Wav {
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels.max(1) as usize
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Sample of `frame` on `channel` in -1..1. Channels past the clip's
    /// last one reuse it, so mono clips feed every output channel.
    pub fn sample(&self, frame: usize, channel: usize) -> f32 {
        let channels = self.channels.max(1) as usize;
        let ch = channel.min(channels - 1);
        self.samples
            .get(frame * channels + ch)
            .map_or(0.0, |&s| s as f32 / 32768.0)
    }
}

#[derive(Debug, PartialEq)]
struct Format {
    tag: u16,
    channels: u16,
    sample_rate: u32,
    bits: u16,
}

fn riff_header(input: &[u8]) -> IResult<&[u8], u32> {
    let (input, (_, size, _)) = tuple((tag("RIFF"), le_u32, tag("WAVE")))(input)?;
    Ok((input, size))
}

fn chunk(input: &[u8]) -> IResult<&[u8], (&[u8], &[u8])> {
    let (input, (id, len)) = tuple((take(4usize), le_u32))(input)?;
    let (input, body) = take(len as usize)(input)?;
    // Odd-sized chunks carry a pad byte.
    let input = if len % 2 == 1 && !input.is_empty() {
        &input[1..]
    } else {
        input
    };
    Ok((input, (id, body)))
}

fn fmt_chunk(input: &[u8]) -> IResult<&[u8], Format> {
    let (input, (tag, channels, sample_rate, _byte_rate, _block_align, bits)) =
        tuple((le_u16, le_u16, le_u32, le_u32, le_u16, le_u16))(input)?;
    Ok((
        input,
        Format {
            tag,
            channels,
            sample_rate,
            bits,
        },
    ))
}

pub fn parse(bytes: &[u8]) -> Result<Wav, WavError> {
    let malformed = |e: nom::Err<nom::error::Error<&[u8]>>| WavError::Malformed(format!("{e:?}"));
    let (mut rest, _) = riff_header(bytes).map_err(malformed)?;

    let mut format = None;
    let mut data = None;
    // Anything shorter than a chunk header is trailing padding.
    while rest.len() >= 8 {
        let (next, (id, body)) = chunk(rest).map_err(malformed)?;
        match id {
            b"fmt " => format = Some(fmt_chunk(body).map_err(malformed)?.1),
            b"data" => data = Some(body),
            other => log::debug!("[wav] skipping chunk {:?}", String::from_utf8_lossy(other)),
        }
        rest = next;
    }

    let format = format.ok_or_else(|| WavError::Malformed("missing fmt chunk".into()))?;
    let data = data.ok_or_else(|| WavError::Malformed("missing data chunk".into()))?;
    if format.tag != FORMAT_PCM {
        return Err(WavError::Unsupported(format!("format tag {}", format.tag)));
    }
    if format.bits != 16 {
        return Err(WavError::Unsupported(format!("{} bits per sample", format.bits)));
    }
    if format.channels == 0 || format.sample_rate == 0 {
        return Err(WavError::Malformed("zero channels or sample rate".into()));
    }

    let (_, samples) = many0(le_i16)(data).map_err(malformed)?;
    Ok(Wav {
        sample_rate: format.sample_rate,
        channels: format.channels,
        samples,
    })
}
