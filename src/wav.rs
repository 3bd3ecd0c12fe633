//! Read-only inspection of a RIFF/WAVE header.
//!
//! The decoder never calls into this module. It only reports what a file declares, so the
//! caller can compare it against the fixed format the decoder assumes.

use heapless::Vec;
use winnow::binary::{le_u16, le_u32};
use winnow::error::ModalResult;
use winnow::token::{literal, take};
use winnow::Parser;

use crate::error::WavHeaderError;
use crate::PcmSpecs;

const MAX_NUM_CHUNKS: usize = 16;

/// Size of a chunk id plus its size field.
const CHUNK_HEADER_SIZE: usize = 8;

/// Chunk types the inspection cares about.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum ChunkId {
    Fmt,  // b"fmt "
    Data, // b"data"
    Other,
}

impl From<&[u8]> for ChunkId {
    fn from(v: &[u8]) -> Self {
        match v {
            b"fmt " => ChunkId::Fmt,
            b"data" => ChunkId::Data,
            _ => ChunkId::Other,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Chunk<'a> {
    pub id: ChunkId,
    /// Absolute offset of the chunk data within the file.
    pub offset: usize,
    pub data: &'a [u8],
}

/// wFormatTag of the fmt chunk.
/// https://github.com/tpn/winsdk-10/blob/9b69fd26ac0c7d0b83d378dba01080e93349c2ed/Include/10.0.14393.0/shared/mmreg.h#L2107-L2372
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WaveFormatTag {
    LinearPcm,
    IeeeFloat,
    ALaw,
    MuLaw,
    ImaAdpcm,
    Extensible,
    Other(u16),
}

impl From<u16> for WaveFormatTag {
    fn from(v: u16) -> Self {
        match v {
            0x0001 => WaveFormatTag::LinearPcm,
            0x0003 => WaveFormatTag::IeeeFloat,
            0x0006 => WaveFormatTag::ALaw,
            0x0007 => WaveFormatTag::MuLaw,
            0x0011 => WaveFormatTag::ImaAdpcm,
            0xFFFE => WaveFormatTag::Extensible,
            x => WaveFormatTag::Other(x),
        }
    }
}

/// What a RIFF/WAVE header declares about its audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredFormat {
    pub format_tag: WaveFormatTag,
    /// Mono: 1, Stereo: 2, and so on.
    pub num_channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    pub bit_depth: u16,
    /// Absolute byte offset of the first sample, if a data chunk was found.
    pub data_offset: Option<usize>,
    /// Length of the data chunk in bytes, if a data chunk was found.
    pub data_len: Option<usize>,
}

impl DeclaredFormat {
    /// Whether the declared fields agree with `specs`.
    /// The data offset is not part of the comparison.
    ///
    /// The subformat GUID of `WAVE_FORMAT_EXTENSIBLE` is not read, so an extensible header
    /// never matches, even when it wraps 16-bit mono linear PCM.
    pub fn matches(&self, specs: &PcmSpecs) -> bool {
        self.format_tag == WaveFormatTag::LinearPcm
            && self.num_channels == specs.num_channels
            && self.sample_rate == specs.sample_rate
            && self.bit_depth == specs.bit_depth
    }
}

/// Fields read from the fmt chunk.
struct FmtSpecs {
    format_tag: WaveFormatTag,
    num_channels: u16,
    sample_rate: u32,
    bit_depth: u16,
}

/// Checks that the file starts with RIFF and its identifier is WAVE.
fn parse_riff_header(input: &mut &[u8]) -> ModalResult<u32> {
    literal(b"RIFF").parse_next(input)?;
    let size = le_u32.parse_next(input)?;
    literal(b"WAVE").parse_next(input)?;
    Ok(size)
}

/// Returns the chunk id, its size and the data. Odd-sized chunks carry one pad byte.
fn parse_chunk<'a>(input: &mut &'a [u8]) -> ModalResult<(ChunkId, &'a [u8])> {
    let id = take(4usize).map(ChunkId::from).parse_next(input)?;
    let size = le_u32.parse_next(input)?;
    let data = take(size).parse_next(input)?;
    if size % 2 == 1 && !input.is_empty() {
        take(1usize).void().parse_next(input)?;
    }
    Ok((id, data))
}

fn parse_fmt(input: &mut &[u8]) -> ModalResult<FmtSpecs> {
    let format_tag = le_u16.map(WaveFormatTag::from).parse_next(input)?;
    let num_channels = le_u16.parse_next(input)?;
    let sample_rate = le_u32.parse_next(input)?;
    let _bytes_per_second = le_u32.parse_next(input)?;
    let _block_align = le_u16.parse_next(input)?;
    let bit_depth = le_u16.parse_next(input)?;
    Ok(FmtSpecs {
        format_tag,
        num_channels,
        sample_rate,
        bit_depth,
    })
}

fn parse_chunks(raw: &[u8]) -> Result<Vec<Chunk<'_>, MAX_NUM_CHUNKS>, WavHeaderError> {
    let mut input = raw;
    parse_riff_header
        .parse_next(&mut input)
        .map_err(|_| WavHeaderError::NotRiffWave)?;

    let mut chunks = Vec::new();
    while !input.is_empty() {
        let offset = raw.len() - input.len() + CHUNK_HEADER_SIZE;
        let (id, data) = parse_chunk
            .parse_next(&mut input)
            .map_err(|_| WavHeaderError::Truncated)?;
        chunks
            .push(Chunk { id, offset, data })
            .map_err(|_| WavHeaderError::TooManyChunks)?;
    }
    Ok(chunks)
}

/// Reads the declared format of a RIFF/WAVE file.
///
/// # Errors
///
/// * `WavHeaderError::NotRiffWave` - The input does not start with `RIFF....WAVE`.
/// * `WavHeaderError::Truncated` - A chunk or the fmt fields are cut short.
/// * `WavHeaderError::TooManyChunks` - More than 16 chunks.
/// * `WavHeaderError::MissingFmtChunk` - No fmt chunk.
pub fn inspect_header(raw: &[u8]) -> Result<DeclaredFormat, WavHeaderError> {
    let chunks = parse_chunks(raw)?;

    let mut fmt = None;
    let mut data = None;
    for chunk in &chunks {
        match chunk.id {
            ChunkId::Fmt => {
                let mut input = chunk.data;
                let specs = parse_fmt
                    .parse_next(&mut input)
                    .map_err(|_| WavHeaderError::Truncated)?;
                fmt = Some(specs);
            }
            ChunkId::Data => data = Some((chunk.offset, chunk.data.len())),
            ChunkId::Other => {}
        }
    }

    let fmt = fmt.ok_or(WavHeaderError::MissingFmtChunk)?;
    Ok(DeclaredFormat {
        format_tag: fmt.format_tag,
        num_channels: fmt.num_channels,
        sample_rate: fmt.sample_rate,
        bit_depth: fmt.bit_depth,
        data_offset: data.map(|(offset, _)| offset),
        data_len: data.map(|(_, len)| len),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(id: &[u8; 4], data: &[u8]) -> alloc::vec::Vec<u8> {
        let mut v = alloc::vec::Vec::new();
        v.extend_from_slice(id);
        v.extend_from_slice(&(data.len() as u32).to_le_bytes());
        v.extend_from_slice(data);
        if data.len() % 2 == 1 {
            v.push(0);
        }
        v
    }

    fn fmt_data(tag: u16, channels: u16, rate: u32, bits: u16) -> alloc::vec::Vec<u8> {
        let block_align = channels * bits / 8;
        let mut v = alloc::vec::Vec::new();
        v.extend_from_slice(&tag.to_le_bytes());
        v.extend_from_slice(&channels.to_le_bytes());
        v.extend_from_slice(&rate.to_le_bytes());
        v.extend_from_slice(&(rate * block_align as u32).to_le_bytes());
        v.extend_from_slice(&block_align.to_le_bytes());
        v.extend_from_slice(&bits.to_le_bytes());
        v
    }

    fn riff(chunks: &[alloc::vec::Vec<u8>]) -> alloc::vec::Vec<u8> {
        let body: alloc::vec::Vec<u8> = chunks.concat();
        let mut v = alloc::vec::Vec::new();
        v.extend_from_slice(b"RIFF");
        v.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
        v.extend_from_slice(b"WAVE");
        v.extend_from_slice(&body);
        v
    }

    #[test]
    fn canonical_header_has_data_at_44() {
        let raw = riff(&[
            chunk(b"fmt ", &fmt_data(1, 1, 44100, 16)),
            chunk(b"data", &[0, 0, 1, 0]),
        ]);
        let format = inspect_header(&raw).unwrap();
        assert_eq!(format.format_tag, WaveFormatTag::LinearPcm);
        assert_eq!(format.data_offset, Some(44));
        assert_eq!(format.data_len, Some(4));
        assert!(format.matches(&PcmSpecs::ASSUMED));
    }

    #[test]
    fn odd_chunk_is_padded() {
        let raw = riff(&[
            chunk(b"fmt ", &fmt_data(1, 2, 48000, 24)),
            chunk(b"LIST", &[1, 2, 3]),
            chunk(b"data", &[0, 0]),
        ]);
        let format = inspect_header(&raw).unwrap();
        assert_eq!(format.data_offset, Some(44 + 8 + 4));
        assert!(!format.matches(&PcmSpecs::ASSUMED));
    }

    #[test]
    fn rejects_non_riff() {
        assert_eq!(
            inspect_header(b"FORM\0\0\0\0AIFF"),
            Err(WavHeaderError::NotRiffWave)
        );
    }

    #[test]
    fn missing_fmt() {
        let raw = riff(&[chunk(b"data", &[0, 0])]);
        assert_eq!(inspect_header(&raw), Err(WavHeaderError::MissingFmtChunk));
    }

    #[test]
    fn truncated_data_chunk() {
        let mut raw = riff(&[
            chunk(b"fmt ", &fmt_data(1, 1, 44100, 16)),
            chunk(b"data", &[0, 0, 0, 0]),
        ]);
        raw.truncate(raw.len() - 2);
        assert_eq!(inspect_header(&raw), Err(WavHeaderError::Truncated));
    }

    #[test]
    fn sixteen_chunks_fit() {
        let mut chunks = alloc::vec![chunk(b"fmt ", &fmt_data(1, 1, 44100, 16))];
        for _ in 0..15 {
            chunks.push(chunk(b"JUNK", &[0, 0]));
        }
        let format = inspect_header(&riff(&chunks)).unwrap();
        assert_eq!(format.data_offset, None);
    }

    #[test]
    fn seventeen_chunks_are_too_many() {
        let chunks: alloc::vec::Vec<_> = (0..17).map(|_| chunk(b"JUNK", &[0, 0])).collect();
        assert_eq!(
            inspect_header(&riff(&chunks)),
            Err(WavHeaderError::TooManyChunks)
        );
    }

    #[test]
    fn extensible_header_does_not_match() {
        let raw = riff(&[
            chunk(b"fmt ", &fmt_data(0xFFFE, 1, 44100, 16)),
            chunk(b"data", &[0, 0]),
        ]);
        let format = inspect_header(&raw).unwrap();
        assert_eq!(format.format_tag, WaveFormatTag::Extensible);
        assert!(!format.matches(&PcmSpecs::ASSUMED));
    }
}
