/// Sample rate used across the whole pipeline. Polly is asked for PCM at
/// this rate and every silence pad is generated at it, so concatenation is
/// plain sample arithmetic.
pub const SAMPLE_RATE_HZ: u32 = 16_000;

/// Decoded mono audio held in memory between synthesis and export.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl AudioBuffer {
    pub fn empty() -> Self {
        Self {
            samples: Vec::new(),
            sample_rate: SAMPLE_RATE_HZ,
        }
    }

    /// A buffer containing `duration_ms` of silence
    pub fn silence(duration_ms: u64) -> Self {
        let sample_count = (SAMPLE_RATE_HZ as u64 * duration_ms / 1000) as usize;
        Self {
            samples: vec![0; sample_count],
            sample_rate: SAMPLE_RATE_HZ,
        }
    }

    /// Build a buffer from little-endian signed 16-bit PCM bytes.
    /// A trailing odd byte is dropped.
    pub fn from_pcm_bytes(bytes: &[u8]) -> Self {
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self {
            samples,
            sample_rate: SAMPLE_RATE_HZ,
        }
    }

    /// Append another buffer's samples after this one's
    pub fn append(&mut self, other: &AudioBuffer) {
        self.samples.extend_from_slice(&other.samples);
    }

    /// Append `duration_ms` of silence
    pub fn push_silence(&mut self, duration_ms: u64) {
        let sample_count = (self.sample_rate as u64 * duration_ms / 1000) as usize;
        self.samples.resize(self.samples.len() + sample_count, 0);
    }

    pub fn duration_ms(&self) -> u64 {
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples as little-endian bytes, the layout ffmpeg expects on stdin
    pub fn to_pcm_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.samples.len() * 2);
        for sample in &self.samples {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        bytes
    }
}
