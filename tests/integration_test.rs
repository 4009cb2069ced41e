// Integration tests for ValoCoach
// These tests drive the full pipeline through the public library API with a
// scripted recognizer standing in for Tesseract.

use image::{GrayImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

use valocoach::ocr::{ImagePreprocessor, TextRecognizer};
use valocoach::stats::verdict::classify;
use valocoach::{
    analyze_text, DerivedMetrics, OcrError, PipelineError, ScoreboardPipeline, StatRecord,
    VerdictCategory,
};

/// Recognizer that returns the same text for every image
struct ScriptedRecognizer(&'static str);

impl TextRecognizer for ScriptedRecognizer {
    fn recognize(&mut self, _binary_image: &GrayImage) -> Result<String, OcrError> {
        Ok(self.0.to_string())
    }
}

/// Helper to create an encoded scoreboard-like image: dark text band on a light background
fn encoded_scoreboard(format: ImageFormat) -> Vec<u8> {
    let mut img = RgbImage::from_pixel(120, 40, Rgb([230, 230, 230]));
    for x in 10..110 {
        for y in 15..25 {
            img.put_pixel(x, y, Rgb([10, 10, 10]));
        }
    }

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encoding should succeed");
    bytes
}

fn run(text: &'static str) -> Result<valocoach::ScanOutcome, PipelineError> {
    let mut pipeline =
        ScoreboardPipeline::new(ImagePreprocessor::default(), ScriptedRecognizer(text))
            .with_binary_retained(true);
    pipeline.scan(&encoded_scoreboard(ImageFormat::Png))
}

#[test]
fn test_scoreboard_end_to_end() {
    let outcome = run("PlayerOne 189 14 15 5\nHeader CS K D A\n").unwrap();

    assert_eq!(outcome.report.record, StatRecord::new(189, 14, 15, 5));
    assert_eq!(outcome.report.metrics.kd_ratio, 0.93);
    assert_eq!(outcome.report.verdict, VerdictCategory::UnderperformingDuels);
}

#[test]
fn test_binary_image_marks_dark_text_as_foreground() {
    let outcome = run("250 20 10 6").unwrap();
    let binary = outcome.binary.expect("binary image retained");

    assert_eq!(binary.dimensions(), (120, 40));
    assert_eq!(binary.get_pixel(50, 20)[0], 255);
    assert_eq!(binary.get_pixel(2, 2)[0], 0);
}

#[test]
fn test_jpeg_input_is_accepted() {
    let mut pipeline =
        ScoreboardPipeline::new(ImagePreprocessor::default(), ScriptedRecognizer("1 2 3 4"));
    let outcome = pipeline
        .scan(&encoded_scoreboard(ImageFormat::Jpeg))
        .unwrap();
    assert_eq!(outcome.report.record, StatRecord::new(1, 2, 3, 4));
}

#[test]
fn test_noisy_scoreboard_rows() {
    // Typical OCR noise: a rank icon read as digits, pipes between columns,
    // a header row and other players below
    let text = "MATCH 12 ROUND 24\n\
                Rank 3 xXJett99 | 276 | 22 / 9 / 4\n\
                Sage 180 9 6 12\n";

    let outcome = run(text).unwrap();
    assert_eq!(outcome.report.record, StatRecord::new(276, 22, 9, 4));
    assert_eq!(outcome.report.metrics.kd_ratio, 2.44);
    assert_eq!(outcome.report.verdict, VerdictCategory::HardCarrying);
}

#[test]
fn test_no_stats_is_recoverable() {
    let err = run("DEFEAT\n\nScoreboard").unwrap_err();
    assert!(matches!(err, PipelineError::NoStatsFound));
    assert!(err.is_recoverable());
}

#[test]
fn test_malformed_bytes() {
    let mut pipeline =
        ScoreboardPipeline::new(ImagePreprocessor::default(), ScriptedRecognizer("1 2 3 4"));
    let err = pipeline.scan(&[0u8; 16]).unwrap_err();
    assert!(matches!(err, PipelineError::Decode(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn test_classifier_priority_table() {
    let cases = [
        (0.5, 10, 25, VerdictCategory::UnderperformingDuels),
        (1.5, 9, 10, VerdictCategory::HighImpactSupport),
        (1.5, 3, 25, VerdictCategory::HardCarrying),
        (1.2, 3, 10, VerdictCategory::AveragePerformance),
    ];

    for (kd_ratio, assists, kills, expected) in cases {
        let record = StatRecord::new(200, kills, 10, assists);
        let verdict = classify(&record, &DerivedMetrics { kd_ratio });
        assert_eq!(verdict, expected, "ratio={kd_ratio} assists={assists} kills={kills}");
    }
}

#[test]
fn test_analyze_text_deathless_match() {
    let report = analyze_text("Chamber 412 24 0 3").unwrap();
    assert_eq!(report.metrics.kd_ratio, 24.0);
    assert_eq!(report.verdict, VerdictCategory::HardCarrying);
}
