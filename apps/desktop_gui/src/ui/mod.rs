//! UI layer for the desktop scanner: root view, panels, and preview textures.

pub mod app;
pub mod panels;
pub mod preview;

pub use app::{PlateScannerApp, StartupConfig};
