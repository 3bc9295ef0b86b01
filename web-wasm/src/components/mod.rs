//! UIコンポーネント

pub mod header;
pub mod language_select;
pub mod output_panel;
pub mod preview_gallery;
pub mod progress_bar;
pub mod upload_area;
