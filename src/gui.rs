pub mod app;
pub mod fonts;
pub mod overlay;

pub use app::SnapTransApp;
