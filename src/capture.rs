pub mod region;
pub mod screen;

pub use region::{Region, MIN_SELECTION_PX};
pub use screen::grab_region;
