//! Pure derivation of the encoder invocation from a request.

use rand::Rng;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::types::{
    InvocationSpec, TranscodeRequest, APPLICATION, CHANNELS, CODEC, COMPRESSION_LEVEL,
    FRAME_DURATION_MS, HIGHPASS_HZ, LOWPASS_HZ, OUTPUT_EXTENSION, PACKET_LOSS_PCT,
    SAMPLE_RATE_HZ,
};

/// Bytes of randomness in a generated output name (32 bits, 8 hex chars).
const SUFFIX_BYTES: usize = 4;

/// Builds the complete ffmpeg invocation for a request. No I/O.
pub fn build_plan(request: &TranscodeRequest) -> InvocationSpec {
    let output_path = request
        .destination()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| generate_output_path(request.source()));
    let filter_chain = filter_chain(request.volume());

    let mut args: Vec<OsString> = vec!["-i".into(), request.source().as_os_str().to_owned()];
    args.extend(
        [
            "-af".to_string(),
            filter_chain.clone(),
            "-c:a".to_string(),
            CODEC.to_string(),
            "-b:a".to_string(),
            format!("{}k", request.bitrate_kbps()),
            "-ac".to_string(),
            CHANNELS.to_string(),
            "-ar".to_string(),
            SAMPLE_RATE_HZ.to_string(),
            "-application".to_string(),
            APPLICATION.to_string(),
            // CBR keeps bytes-per-second predictable for the capacity check
            "-vbr".to_string(),
            "off".to_string(),
            "-compression_level".to_string(),
            COMPRESSION_LEVEL.to_string(),
            "-frame_duration".to_string(),
            FRAME_DURATION_MS.to_string(),
            "-packet_loss".to_string(),
            PACKET_LOSS_PCT.to_string(),
            "-t".to_string(),
            request.duration_secs().to_string(),
            "-y".to_string(), // Overwrite output
        ]
        .into_iter()
        .map(OsString::from),
    );
    // Paths pass through as OS strings; they need not be UTF-8
    args.push(output_path.as_os_str().to_owned());

    InvocationSpec {
        input_path: request.source().to_path_buf(),
        output_path,
        filter_chain,
        args,
    }
}

/// High-pass, low-pass, then gain.
pub fn filter_chain(volume: f64) -> String {
    format!(
        "highpass=f={},lowpass=f={},volume={}",
        HIGHPASS_HZ, LOWPASS_HZ, volume
    )
}

/// `<stem>_optimized_<8 hex>.opus`, relative to the working directory.
pub fn generate_output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());

    PathBuf::from(format!(
        "{}_optimized_{}.{}",
        stem,
        random_suffix(),
        OUTPUT_EXTENSION
    ))
}

fn random_suffix() -> String {
    let bytes: [u8; SUFFIX_BYTES] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
