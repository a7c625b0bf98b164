//! Anamorphic video detection and scale filter generation.
//!
//! When a video's pixels are not square, frames decoded at storage resolution
//! look squashed or stretched. The first video stream's sample aspect ratio
//! decides whether the candidates need a width rescale.

use crate::cancellation::CancellationToken;
use crate::error::CoreResult;
use crate::external::{ProbeStream, ProcessRunner, probe_streams};

use std::path::Path;

/// Rescales width by the sample aspect ratio so pixels become square.
pub const ANAMORPHIC_SCALE_FILTER: &str = "scale=iw*sar:ih";

/// Picks the scale filter for a set of probed streams, if one is needed.
///
/// Only the first video stream is considered. Square pixels (`1:1`) and
/// unknown ratios (`0:1`) need no correction.
pub fn aspect_filter_for(streams: &[ProbeStream]) -> Option<String> {
    let video = streams.iter().find(|s| s.is_video())?;

    let square_or_unknown = video.sample_aspect_ratio == "1:1"
        || video.sample_aspect_ratio == "0:1"
        || video.display_aspect_ratio == "0:1";
    if square_or_unknown {
        return None;
    }

    log::debug!(
        "Anamorphic video stream (SAR {}, DAR {}), applying {}",
        video.sample_aspect_ratio,
        video.display_aspect_ratio,
        ANAMORPHIC_SCALE_FILTER
    );
    Some(ANAMORPHIC_SCALE_FILTER.to_string())
}

/// Probes `input_path` and derives the aspect-correcting filter for it.
///
/// Returns `Ok(None)` when no correction is required, including when the
/// file has no video stream at all.
pub fn derive_aspect_filter<R: ProcessRunner + ?Sized>(
    runner: &R,
    ffprobe_path: &Path,
    input_path: &Path,
    cancel: &CancellationToken,
) -> CoreResult<Option<String>> {
    let streams = probe_streams(runner, ffprobe_path, input_path, cancel)?;
    if !streams.iter().any(ProbeStream::is_video) {
        log::warn!("No video stream reported for {}", input_path.display());
    }
    Ok(aspect_filter_for(&streams))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(codec_type: &str, sar: &str, dar: &str) -> ProbeStream {
        ProbeStream {
            codec_type: codec_type.to_string(),
            sample_aspect_ratio: sar.to_string(),
            display_aspect_ratio: dar.to_string(),
        }
    }

    #[test]
    fn test_square_and_unknown_ratios_need_no_filter() {
        let cases = [
            ("1:1", "16:9"),
            ("0:1", "16:9"),
            ("4:3", "0:1"),
            ("1:1", "0:1"),
        ];
        for (sar, dar) in cases {
            assert_eq!(
                aspect_filter_for(&[stream("video", sar, dar)]),
                None,
                "SAR {sar} DAR {dar}"
            );
        }
    }

    #[test]
    fn test_anamorphic_ratio_gets_scale_filter() {
        let filter = aspect_filter_for(&[stream("video", "4:3", "16:9")]);
        assert_eq!(filter.as_deref(), Some(ANAMORPHIC_SCALE_FILTER));

        let filter = aspect_filter_for(&[stream("video", "32:27", "16:9")]);
        assert_eq!(filter.as_deref(), Some("scale=iw*sar:ih"));
    }

    #[test]
    fn test_no_video_stream_means_no_filter() {
        assert_eq!(aspect_filter_for(&[]), None);
        assert_eq!(aspect_filter_for(&[stream("audio", "4:3", "16:9")]), None);
    }

    #[test]
    fn test_only_first_video_stream_counts() {
        let streams = [
            stream("audio", "", ""),
            stream("video", "1:1", "16:9"),
            stream("video", "4:3", "16:9"),
        ];
        assert_eq!(aspect_filter_for(&streams), None);
    }

    #[test]
    fn test_missing_ratio_fields_are_treated_as_anamorphic() {
        // Empty strings are neither 1:1 nor 0:1.
        let filter = aspect_filter_for(&[stream("video", "", "")]);
        assert_eq!(filter.as_deref(), Some(ANAMORPHIC_SCALE_FILTER));
    }
}
