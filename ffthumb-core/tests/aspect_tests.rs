// ffthumb-core/tests/aspect_tests.rs

use ffthumb_core::CancellationToken;
use ffthumb_core::error::CoreError;
use ffthumb_core::external::MockProcessRunner;
use ffthumb_core::processing::{ANAMORPHIC_SCALE_FILTER, derive_aspect_filter};
use std::path::Path;

fn derive(runner: &MockProcessRunner) -> Result<Option<String>, CoreError> {
    derive_aspect_filter(
        runner,
        Path::new("/usr/bin/ffprobe"),
        Path::new("/videos/in.mkv"),
        &CancellationToken::new(),
    )
}

fn video_json(sar: &str, dar: &str) -> String {
    format!(
        r#"{{"streams":[{{"codec_type":"video","sample_aspect_ratio":"{sar}","display_aspect_ratio":"{dar}"}}]}}"#
    )
}

#[test]
fn test_square_pixels_need_no_filter() {
    for (sar, dar) in [("1:1", "16:9"), ("0:1", "4:3"), ("4:3", "0:1")] {
        let runner = MockProcessRunner::new();
        runner.expect_probe_json(&video_json(sar, dar));
        assert_eq!(derive(&runner).unwrap(), None, "SAR {sar} DAR {dar}");
    }
}

#[test]
fn test_anamorphic_stream_gets_filter() {
    let runner = MockProcessRunner::new();
    runner.expect_probe_json(&video_json("4:3", "16:9"));
    assert_eq!(derive(&runner).unwrap().as_deref(), Some(ANAMORPHIC_SCALE_FILTER));
}

#[test]
fn test_audio_only_file_needs_no_filter() {
    let runner = MockProcessRunner::new();
    runner.expect_probe_json(r#"{"streams":[{"codec_type":"audio"}]}"#);
    assert_eq!(derive(&runner).unwrap(), None);
}

#[test]
fn test_probe_request_shape() {
    let runner = MockProcessRunner::new();
    runner.expect_probe_json(r#"{"streams":[]}"#);
    derive(&runner).unwrap();

    let calls = runner.get_received_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, Path::new("/usr/bin/ffprobe"));
    assert_eq!(
        calls[0].command_line(),
        "/usr/bin/ffprobe -v error -print_format json -show_entries \
         stream=codec_type,sample_aspect_ratio,display_aspect_ratio /videos/in.mkv"
    );
}

#[test]
fn test_probe_exit_failure_carries_diagnostics() {
    let runner = MockProcessRunner::new();
    runner.expect_failure("ffprobe", 1, "/videos/in.mkv: Invalid data found when processing input\n");

    let err = derive(&runner).unwrap_err();
    match &err {
        CoreError::CommandFailed { cmd, stderr, status } => {
            assert_eq!(cmd, "ffprobe");
            assert!(!status.success());
            assert_eq!(stderr, "/videos/in.mkv: Invalid data found when processing input");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_malformed_json_is_parse_error() {
    let runner = MockProcessRunner::new();
    runner.expect_probe_json(r#"{"streams": [ {"codec_type": "video", }"#);
    assert!(matches!(derive(&runner), Err(CoreError::ProbeParse(_))));
}
