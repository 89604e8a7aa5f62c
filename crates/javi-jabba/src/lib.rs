mod backend;
mod client;
mod detection;
mod provider;
mod runtime;
mod version;

pub use backend::JabbaBackend;
pub use client::{CommandTimeouts, JabbaClient, JabbaEnvironment};
pub use detection::{JabbaDetection, detect_jabba, environment_for};
pub use provider::JabbaProvider;
pub use runtime::JavaRuntimeProbe;
pub use version::{parse_current, parse_version_list};
