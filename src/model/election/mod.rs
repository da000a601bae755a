pub mod document;
pub mod settings;

pub use document::{ElectionDocument, DOCUMENT_KEY};
pub use settings::{ElectionSettings, SettingsPatch};
