//! Fixed-layout PCM decoder.
//!
//! The bytes before the header offset are skipped without being read. Everything after it is
//! treated as 16-bit signed little-endian mono PCM.

use alloc::vec::Vec;
use fixed::types::I1F15;
use winnow::binary::le_i16;
use winnow::error::ModalResult;
use winnow::Parser;

use crate::error::DecodeError;
use crate::DEFAULT_HEADER_OFFSET;

/// normalize factor: 2^(BitDepth-1)
const NORMALIZE_FACTOR: f32 = 32768.0;

const BYTES_PER_SAMPLE: usize = 2;

/// Decodes 16-bit mono PCM that starts at a fixed byte offset.
///
/// The header in front of the samples is trusted, not parsed: channel count, sample rate and
/// bit depth are always assumed to be [`crate::PcmSpecs::ASSUMED`].
/// Use [`crate::inspect_header`] to see what a file actually declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmDecoder {
    header_offset: usize,
}

impl Default for PcmDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_OFFSET)
    }
}

impl PcmDecoder {
    /// * 'header_offset' - Number of bytes skipped before the first sample.
    pub const fn new(header_offset: usize) -> Self {
        Self { header_offset }
    }

    pub const fn header_offset(&self) -> usize {
        self.header_offset
    }

    /// Returns the sample bytes of `raw`, or an error when the offset is past its end.
    fn data<'a>(&self, raw: &'a [u8]) -> Result<&'a [u8], DecodeError> {
        raw.get(self.header_offset..)
            .ok_or(DecodeError::InvalidOffset {
                offset: self.header_offset,
                len: raw.len(),
            })
    }

    /// Number of samples `decode` would return for `raw`.
    /// A trailing odd byte does not count.
    pub fn num_samples(&self, raw: &[u8]) -> Result<usize, DecodeError> {
        Ok(self.data(raw)?.len() / BYTES_PER_SAMPLE)
    }

    /// Decodes every sample after the header offset.
    /// Returns normalized values in the range [-1.0, 1.0).
    ///
    /// # Errors
    ///
    /// * `DecodeError::InvalidOffset` - The header offset is greater than `raw.len()`.
    pub fn decode(&self, raw: &[u8]) -> Result<Vec<f32>, DecodeError> {
        let data = self.data(raw)?;
        Ok(Samples::new(data).map(normalize).collect())
    }

    /// Decodes without allocating.
    /// Writes at most `out.len()` samples and returns how many were written.
    pub fn decode_into(&self, raw: &[u8], out: &mut [f32]) -> Result<usize, DecodeError> {
        let data = self.data(raw)?;
        let mut written = 0;
        for (slot, sample) in out.iter_mut().zip(Samples::new(data)) {
            *slot = normalize(sample);
            written += 1;
        }
        Ok(written)
    }

    /// Decodes to Q1.15 fixed-point values, bit-exact with the input.
    pub fn decode_fixed(&self, raw: &[u8]) -> Result<Vec<I1F15>, DecodeError> {
        let data = self.data(raw)?;
        Ok(Samples::new(data).collect())
    }

    /// Returns the value of a sample at an arbitrary position.
    ///
    /// # Errors
    ///
    /// * `DecodeError::InvalidOffset` - The header offset is greater than `raw.len()`.
    /// * `DecodeError::InvalidSample` - `index` is not less than the number of samples.
    pub fn read_sample(&self, raw: &[u8], index: usize) -> Result<f32, DecodeError> {
        let data = self.data(raw)?;
        let num_samples = data.len() / BYTES_PER_SAMPLE;
        let invalid = DecodeError::InvalidSample { index, num_samples };
        let start = index.checked_mul(BYTES_PER_SAMPLE).ok_or(invalid)?;
        let mut input = data.get(start..).ok_or(invalid)?;
        let sample = parse_sample(&mut input).map_err(|_| invalid)?;
        Ok(normalize(sample))
    }
}

/// Decodes `raw` with the given header offset.
///
/// Same as `PcmDecoder::new(header_offset).decode(raw)`.
pub fn decode(raw: &[u8], header_offset: usize) -> Result<Vec<f32>, DecodeError> {
    PcmDecoder::new(header_offset).decode(raw)
}

fn parse_sample(input: &mut &[u8]) -> ModalResult<I1F15> {
    le_i16.map(I1F15::from_bits).parse_next(input)
}

fn normalize(sample: I1F15) -> f32 {
    sample.to_bits() as f32 / NORMALIZE_FACTOR
}

/// Iterates over the complete sample pairs of a byte slice.
struct Samples<'a> {
    input: &'a [u8],
}

impl<'a> Samples<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input }
    }
}

impl Iterator for Samples<'_> {
    type Item = I1F15;

    fn next(&mut self) -> Option<Self::Item> {
        // A single leftover byte fails to parse and ends the iteration.
        parse_sample(&mut self.input).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.input.len() / BYTES_PER_SAMPLE;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Samples<'_> {}
