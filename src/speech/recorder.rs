use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::warn;

use super::device::AudioFrame;

/// The finished playback recording for one capture
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// Path of the WAV file
    pub file_path: PathBuf,
    /// Sample rate
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Number of samples written
    pub sample_count: usize,
}

/// Writes the capture's audio to disk as a single WAV file
pub struct WavRecorder {
    writer: Option<hound::WavWriter<BufWriter<File>>>,
    artifact: AudioArtifact,
}

impl WavRecorder {
    pub fn create(file_path: PathBuf, sample_rate: u32, channels: u16) -> Result<Self> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let writer = hound::WavWriter::create(&file_path, spec)
            .with_context(|| format!("Failed to create WAV file: {:?}", file_path))?;

        Ok(Self {
            writer: Some(writer),
            artifact: AudioArtifact {
                file_path,
                sample_rate,
                channels,
                sample_count: 0,
            },
        })
    }

    pub fn write_frame(&mut self, frame: &AudioFrame) -> Result<()> {
        if let Some(writer) = &mut self.writer {
            for &sample in &frame.samples {
                writer
                    .write_sample(sample)
                    .context("Failed to write sample to WAV")?;
            }
            self.artifact.sample_count += frame.samples.len();
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<AudioArtifact> {
        if let Some(writer) = self.writer.take() {
            writer.finalize().context("Failed to finalize WAV file")?;
        }
        Ok(self.artifact.clone())
    }
}

impl Drop for WavRecorder {
    fn drop(&mut self) {
        if let Some(writer) = self.writer.take() {
            if let Err(e) = writer.finalize() {
                warn!("Failed to finalize WAV writer on drop: {}", e);
            }
        }
    }
}
