//! OCRエンジン（Tesseract.js）

pub mod js_bindings;
pub mod tesseract;

pub use tesseract::TesseractFactory;
