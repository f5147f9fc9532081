pub mod capture;
pub mod gui;
pub mod i18n;
pub mod normalize;
pub mod ocr;
pub mod pipeline;
pub mod preprocess;
pub mod settings;
pub mod translate;
pub mod utils;
