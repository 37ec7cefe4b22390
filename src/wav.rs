//! WAV File Generation
//!
//! This module provides functionality to write FT8 waveforms to WAV audio files.
//!
//! **WAV Format**:
//! - 16-bit PCM (signed integer samples)
//! - 12 kHz sample rate (standard for FT8)
//! - Mono channel
//!
//! **Usage**:
//! The module can operate in two modes:
//! - With `std`: Write directly to files using `write_wav_file`
//! - Without `std`: Generate WAV bytes using `generate_wav_bytes`

extern crate alloc;
use std::vec::Vec;
use std::string::String;

/// WAV file header structure (44 bytes for 16-bit PCM mono)
struct WavHeader {
    sample_rate: u32,
    num_samples: u32,
}

impl WavHeader {
    fn new(sample_rate: u32, num_samples: u32) -> Self {
        Self {
            sample_rate,
            num_samples,
        }
    }

    /// Generate the 44-byte WAV header
    fn to_bytes(&self) -> [u8; 44] {
        let mut header = [0u8; 44];
        let data_size = self.num_samples * 2; // 2 bytes per sample (16-bit)
        let file_size = data_size + 36; // File size - 8 bytes

        // RIFF chunk descriptor
        header[0..4].copy_from_slice(b"RIFF");
        header[4..8].copy_from_slice(&file_size.to_le_bytes());
        header[8..12].copy_from_slice(b"WAVE");

        // fmt sub-chunk
        header[12..16].copy_from_slice(b"fmt ");
        header[16..20].copy_from_slice(&16u32.to_le_bytes()); // Subchunk1Size (16 for PCM)
        header[20..22].copy_from_slice(&1u16.to_le_bytes()); // AudioFormat (1 = PCM)
        header[22..24].copy_from_slice(&1u16.to_le_bytes()); // NumChannels (1 = mono)
        header[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());

        let byte_rate = self.sample_rate * 2; // SampleRate * NumChannels * BitsPerSample/8
        header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
        header[32..34].copy_from_slice(&2u16.to_le_bytes()); // BlockAlign (NumChannels * BitsPerSample/8)
        header[34..36].copy_from_slice(&16u16.to_le_bytes()); // BitsPerSample

        // data sub-chunk
        header[36..40].copy_from_slice(b"data");
        header[40..44].copy_from_slice(&data_size.to_le_bytes());

        header
    }
}

/// Convert floating-point samples [-1.0, 1.0] to 16-bit PCM samples
///
/// Clamps values outside the range and scales to i16 range [-32768, 32767].
fn f32_to_i16(sample: f32) -> i16 {
    let clamped = if sample > 1.0 {
        1.0
    } else if sample < -1.0 {
        -1.0
    } else {
        sample
    };

    (clamped * 32767.0) as i16
}

/// Generate WAV file bytes from floating-point samples
///
/// Converts the waveform to 16-bit PCM format and wraps it with a WAV header.
///
/// # Arguments
/// * `samples` - Floating-point audio samples in range [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 12000 for FT8)
///
/// # Returns
/// * `Vec<u8>` - Complete WAV file as bytes
///
/// # Example
/// ```
/// use rustyft8::wav;
///
/// let samples = vec![0.0f32; 151680]; // 79 symbols * 1920 samples/symbol
/// let wav_bytes = wav::generate_wav_bytes(&samples, 12000);
/// // Write wav_bytes to file or transmit over network
/// ```
pub fn generate_wav_bytes(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let num_samples = samples.len() as u32;
    let header = WavHeader::new(sample_rate, num_samples);
    let header_bytes = header.to_bytes();

    let mut wav_data = Vec::with_capacity(44 + (num_samples as usize * 2));
    wav_data.extend_from_slice(&header_bytes);

    for &sample in samples {
        let pcm_sample = f32_to_i16(sample);
        wav_data.extend_from_slice(&pcm_sample.to_le_bytes());
    }

    wav_data
}

/// Write WAV file to disk (requires std feature)
///
/// Generates a WAV file from floating-point samples and writes it to the specified path.
///
/// # Arguments
/// * `path` - File path for the output WAV file
/// * `samples` - Floating-point audio samples in range [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 12000 for FT8)
///
/// # Returns
/// * `Result<(), String>` - Success or error message
///
/// # Example
/// ```no_run
/// use rustyft8::wav;
///
/// let samples = vec![0.0f32; 151680];
/// wav::write_wav_file("output.wav", &samples, 12000)?;
/// # Ok::<(), String>(())
/// ```
#[cfg(any(feature = "std", test))]
pub fn write_wav_file(path: &str, samples: &[f32], sample_rate: u32) -> Result<(), String> {
    extern crate std;
    use std::fs::File;
    use std::io::Write;

    let wav_bytes = generate_wav_bytes(samples, sample_rate);

    let mut file = File::create(path)
        .map_err(|e| format!("Failed to create file '{}': {}", path, e))?;

    file.write_all(&wav_bytes)
        .map_err(|e| format!("Failed to write to file '{}': {}", path, e))?;

    Ok(())
}
