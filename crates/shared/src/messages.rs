//! User-facing workflow messages shared by the desktop app and the CLI.

pub const SELECT_IMAGE_FIRST: &str = "Please select an image first";
pub const DROP_IMAGE_FILE: &str = "Please drop an image file";
pub const UNREADABLE_FILE: &str = "Could not read the selected file";
pub const SUBMISSION_FAILED: &str = "Error processing the image. Please try again.";
