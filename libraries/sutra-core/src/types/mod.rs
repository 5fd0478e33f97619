mod catalog;
mod text_panel;
mod track;

pub use catalog::{Catalog, CatalogFormat};
pub use text_panel::{TextLibrary, TextPanelEntry};
pub use track::TrackDescriptor;
