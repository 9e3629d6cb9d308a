//! Process contract tests for the ffmpeg executor, using shell scripts in place of ffmpeg.
//!
//! Everything runs inside one test so no other thread forks while a script
//! is still open for writing.

#![cfg(unix)]

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tempfile::TempDir;

use pearl_core::{
    build_plan, testing::fixtures, testing::MockPlayer, EncodeError, Encoder, EncoderConfig,
    FfmpegEncoder, OptimizeOptions, Optimizer,
};

const PROBE: &str = r#"
if [ "$1" = "-version" ]; then echo "ffmpeg version 9.9-fake Copyright (c) the FFmpeg developers"; exit 0; fi
if [ "$1" = "-hide_banner" ]; then echo " A..... libopus              libopus Opus (codec opus)"; exit 0; fi
"#;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n{}\n", PROBE, body))
        .expect("Failed to write script");
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn encoder(script: &Path) -> FfmpegEncoder {
    FfmpegEncoder::new(
        EncoderConfig::with_path(script)
            .with_encode_timeout(1)
            .with_probe_timeout(1),
    )
}

#[tokio::test]
async fn test_ffmpeg_process_contract() {
    let dir = TempDir::new().unwrap();
    let input = fixtures::sample_input(dir.path());
    let output = dir.path().join("out.opus");

    let writes = write_script(
        dir.path(),
        "ffmpeg-ok",
        r#"for last; do :; done
printf '%0321d' 0 > "$last""#,
    );
    let fails = write_script(
        dir.path(),
        "ffmpeg-fail",
        r#"echo "Unknown encoder 'libopus'" >&2
exit 1"#,
    );
    let pid_file = dir.path().join("hang.pid");
    let hangs = write_script(
        dir.path(),
        "ffmpeg-hang",
        &format!("echo $$ > \"{}\"\nexec sleep 30", pid_file.display()),
    );
    let call_log = dir.path().join("calls.log");
    let counted = dir.path().join("ffmpeg-counted");
    std::fs::write(
        &counted,
        format!(
            "#!/bin/sh\necho \"$1\" >> \"{}\"\n{}\nfor last; do :; done\nprintf '%0321d' 0 > \"$last\"\n",
            call_log.display(),
            PROBE
        ),
    )
    .unwrap();
    std::fs::set_permissions(&counted, std::fs::Permissions::from_mode(0o755)).unwrap();
    let silent = write_script(dir.path(), "ffmpeg-silent", "exit 0");
    let probe_hangs = dir.path().join("ffmpeg-probe-hang");
    std::fs::write(&probe_hangs, "#!/bin/sh\nexec sleep 30\n").unwrap();
    std::fs::set_permissions(&probe_hangs, std::fs::Permissions::from_mode(0o755)).unwrap();

    let request = fixtures::request_with_output(&input, &output);
    let spec = build_plan(&request);

    // Availability probe
    assert!(encoder(&writes).is_available().await);
    let start = Instant::now();
    assert!(!encoder(&probe_hangs).is_available().await);
    assert!(start.elapsed() < Duration::from_secs(5));

    // Capabilities
    let caps = encoder(&writes).capabilities().await;
    assert_eq!(caps.version.as_deref(), Some("9.9-fake"));
    assert!(caps.libopus);

    // Success: size read back from disk
    let outcome = encoder(&writes).execute(&spec).await.unwrap();
    assert_eq!(outcome.output_path, output);
    assert_eq!(outcome.size_bytes, 321);

    // Existing output is overwritten
    std::fs::write(&output, vec![1u8; 5000]).unwrap();
    let outcome = encoder(&writes).execute(&spec).await.unwrap();
    assert_eq!(outcome.size_bytes, 321);

    // Non-zero exit: stderr verbatim
    match encoder(&fails).execute(&spec).await {
        Err(EncodeError::EncodeFailed { exit_code, stderr }) => {
            assert_eq!(exit_code, Some(1));
            assert_eq!(stderr, "Unknown encoder 'libopus'\n");
        }
        other => panic!("expected EncodeFailed, got {:?}", other),
    }

    // Timeout: bounded and killed
    let start = Instant::now();
    let result = encoder(&hangs).execute(&spec).await;
    assert!(matches!(
        result,
        Err(EncodeError::EncodeTimeout { timeout_secs: 1 })
    ));
    assert!(start.elapsed() < Duration::from_secs(5));
    let pid = std::fs::read_to_string(&pid_file).unwrap();
    let alive = std::process::Command::new("kill")
        .args(["-0", pid.trim()])
        .stderr(std::process::Stdio::null())
        .status()
        .unwrap();
    assert!(!alive.success(), "timed out encoder {} still running", pid.trim());

    // Exit 0 without an artifact
    let missing = dir.path().join("never-written.opus");
    let request = fixtures::request_with_output(&input, &missing);
    let result = encoder(&silent).execute(&build_plan(&request)).await;
    assert!(matches!(result, Err(EncodeError::OutputUnreadable { .. })));

    // Paths that are not UTF-8 reach the encoder byte for byte
    let odd_input = dir
        .path()
        .join(OsStr::from_bytes(b"voix-\xe9.wav"));
    std::fs::copy(&input, &odd_input).unwrap();
    let odd_output = dir.path().join(OsStr::from_bytes(b"sortie-\xe9.opus"));
    let request = fixtures::request_with_output(&odd_input, &odd_output);
    let outcome = encoder(&writes).execute(&build_plan(&request)).await.unwrap();
    assert_eq!(outcome.output_path, odd_output);
    assert_eq!(std::fs::metadata(&odd_output).unwrap().len(), 321);

    // One -version run serves both the availability check and the version parse
    let optimizer = Optimizer::new(encoder(&counted), MockPlayer::new());
    optimizer
        .run(
            &fixtures::request_with_output(&input, &output),
            &OptimizeOptions::default(),
        )
        .await
        .unwrap();
    let calls = std::fs::read_to_string(&call_log).unwrap();
    assert_eq!(
        calls.lines().collect::<Vec<_>>(),
        vec!["-version", "-hide_banner", "-i"]
    );

    // Whole run through the optimizer
    let optimizer = Optimizer::new(encoder(&writes), MockPlayer::new());
    let run = optimizer
        .run(
            &fixtures::request_with_output(&input, &output),
            &OptimizeOptions::default(),
        )
        .await
        .unwrap();
    let report = run.report.unwrap();
    assert_eq!(report.raw_len, 321);
    assert_eq!(report.encoded_len, 428);
    assert!(report.fits);
}
