//! Version vocabulary and tool capabilities shared by every javi crate.

mod convert;
mod error;
mod traits;
mod types;

pub use convert::{to_display, to_legacy};
pub use error::BackendError;
pub use traits::{
    BackendDetection, BackendInfo, BackendProvider, RuntimeProbe, VersionManager,
    VersionManagerClone,
};
pub use types::{
    DEFAULT_VENDOR, DisplayVersion, LTS_MAJORS, MARKER_FILE_NAME, RawVersion, VersionIdentifier,
    compare_numeric_aware, leading_number,
};
