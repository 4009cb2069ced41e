/// Scoreboard pipeline
///
/// Coordinates decoding, preprocessing, OCR, parsing, metric derivation and
/// verdict classification for one screenshot at a time.
use image::GrayImage;

use crate::error::PipelineError;
use crate::ocr::text_extraction::parse_stat_record;
use crate::ocr::{decode_image, ImagePreprocessor, TextRecognizer};
use crate::report::MatchReport;
use crate::utils::{StageTiming, Timer};

/// Result of a successful scan
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub report: MatchReport,
    /// Binarized image, kept only when requested for diagnostics
    pub binary: Option<GrayImage>,
    pub timing: StageTiming,
}

/// Scoreboard pipeline
///
/// Orchestrates the full process:
/// 1. Decode image bytes
/// 2. Binarize
/// 3. Run OCR
/// 4. Parse the first stat row, derive metrics and classify
pub struct ScoreboardPipeline<R: TextRecognizer> {
    preprocessor: ImagePreprocessor,
    recognizer: R,
    keep_binary: bool,
}

impl<R: TextRecognizer> ScoreboardPipeline<R> {
    pub fn new(preprocessor: ImagePreprocessor, recognizer: R) -> Self {
        Self {
            preprocessor,
            recognizer,
            keep_binary: false,
        }
    }

    /// Keep the binary image in the outcome for diagnostic display
    pub fn with_binary_retained(mut self, keep: bool) -> Self {
        self.keep_binary = keep;
        self
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// Run the pipeline on encoded image bytes.
    ///
    /// # Returns
    /// `Ok(ScanOutcome)` with the report, or the first terminal error:
    /// `Decode`, `Recognition` or `NoStatsFound`
    pub fn scan(&mut self, image_bytes: &[u8]) -> Result<ScanOutcome, PipelineError> {
        let mut timer = Timer::start();
        let mut timing = StageTiming::new();

        let raw = decode_image(image_bytes)?;
        timing.decode_us = timer.lap_us();
        tracing::info!("Scanning scoreboard {}x{}", raw.width(), raw.height());

        let binary = self.preprocessor.preprocess(&raw);
        drop(raw);
        timing.preprocess_us = timer.lap_us();

        let text = self.recognizer.recognize(&binary)?;
        timing.ocr_us = timer.lap_us();

        let report = analyze_text(&text);
        timing.parse_us = timer.lap_us();
        timing.total_us = timer.total_us();
        timing.log();

        let report = report?;
        tracing::info!(
            "Extracted {} (K/D {}) -> {:?}",
            report.record,
            report.metrics.kd_ratio,
            report.verdict
        );

        Ok(ScanOutcome {
            report,
            binary: self.keep_binary.then_some(binary),
            timing,
        })
    }
}

/// Parse recognized text and produce the report.
///
/// Used by the pipeline after OCR and directly on saved OCR output.
pub fn analyze_text(raw_text: &str) -> Result<MatchReport, PipelineError> {
    let record = parse_stat_record(raw_text)?;
    Ok(MatchReport::from_record(record))
}
