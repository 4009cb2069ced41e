/// Tesseract text recognition
///
/// This module handles Tesseract initialization and OCR on binarized
/// scoreboard images. The engine is wrapped behind `TextRecognizer` so the
/// pipeline can run against a fake in tests.
use image::{GrayImage, ImageFormat};
use leptess::{LepTess, Variable};
use std::path::PathBuf;

use crate::error::OcrError;

/// Anything that turns a binary image into raw text
pub trait TextRecognizer {
    /// Recognize the text in a preprocessed image
    fn recognize(&mut self, binary_image: &GrayImage) -> Result<String, OcrError>;
}

/// Engine settings handed in at construction time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerSettings {
    /// Directory containing `<language>.traineddata`; `None` uses the system install
    pub tessdata_path: Option<PathBuf>,
    pub language: String,
    /// Tesseract page segmentation mode
    pub page_segmentation_mode: u8,
}

impl Default for RecognizerSettings {
    fn default() -> Self {
        Self {
            tessdata_path: None,
            language: "eng".to_string(),
            // PSM 6 = Assume a single uniform block of text
            page_segmentation_mode: 6,
        }
    }
}

/// Tesseract OCR recognizer
///
/// `LepTess::new` initializes with the default engine mode (OEM 3), which
/// uses the legacy and LSTM engines together where the traineddata allows.
pub struct TesseractRecognizer {
    tess: LepTess,
}

impl TesseractRecognizer {
    /// Create a new Tesseract recognizer
    ///
    /// # Returns
    /// `Ok(TesseractRecognizer)` on success, or `OcrError` if Tesseract
    /// cannot be initialized or configured
    pub fn new(settings: &RecognizerSettings) -> Result<Self, OcrError> {
        tracing::info!("Initializing Tesseract OCR...");

        let data_path = settings
            .tessdata_path
            .as_ref()
            .and_then(|p| p.to_str().map(|s| s.to_string()));

        if let Some(path) = &data_path {
            tracing::info!("Initializing Tesseract with datapath: {}", path);
        }

        let mut tess = LepTess::new(data_path.as_deref(), &settings.language)
            .map_err(|e| OcrError::InitFailed(Box::new(e)))?;

        tess.set_variable(
            Variable::TesseditPagesegMode,
            &settings.page_segmentation_mode.to_string(),
        )
        .map_err(|e| OcrError::ConfigureFailed {
            name: "tessedit_pageseg_mode",
            source: Box::new(e),
        })?;

        tracing::info!("✓ Tesseract OCR initialized");
        tracing::info!(
            "  Language: {}, PSM: {}",
            settings.language,
            settings.page_segmentation_mode
        );

        Ok(Self { tess })
    }
}

impl TextRecognizer for TesseractRecognizer {
    /// Perform OCR on a binary (preprocessed) image
    ///
    /// The image goes through a temporary PNG because leptess loads images
    /// from a path. The text is returned untouched; cleanup belongs to the
    /// parser.
    fn recognize(&mut self, binary_image: &GrayImage) -> Result<String, OcrError> {
        let temp = tempfile::Builder::new()
            .prefix("valocoach-ocr-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::ImageTransferFailed(Box::new(e)))?;

        binary_image
            .save_with_format(temp.path(), ImageFormat::Png)
            .map_err(|e| OcrError::ImageTransferFailed(Box::new(e)))?;

        self.tess
            .set_image(temp.path())
            .map_err(|e| OcrError::ImageTransferFailed(Box::new(e)))?;

        let text = self
            .tess
            .get_utf8_text()
            .map_err(|e| OcrError::RecognitionFailed(Box::new(e)))?;

        tracing::debug!("[valocoach][ocr-raw] {:?}", text);

        Ok(text)
    }
}
