/// OCR module for scoreboard stat extraction
///
/// Turns a scoreboard screenshot into a `StatRecord`.
///
/// # Architecture
///
/// The module is split into focused submodules:
/// - `preprocessing`: Image decoding, grayscale conversion and thresholding
/// - `detection`: Tesseract OCR integration behind the `TextRecognizer` trait
/// - `text_extraction`: Parsing the first stat row out of OCR text
///
/// The stages are chained by `crate::pipeline::ScoreboardPipeline`.
pub mod detection;
pub mod preprocessing;
pub mod text_extraction;

pub use detection::{RecognizerSettings, TesseractRecognizer, TextRecognizer};
pub use preprocessing::{decode_image, ImagePreprocessor, DEFAULT_THRESHOLD};
pub use text_extraction::parse_stat_record;
