use crate::report::display_setting::DisplaySetting;
use crate::report::error::FormatError;
use serde::{Deserialize, Serialize};

/// A serialized error record plus the settings to render it with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatRequest {
    #[serde(alias = "Message", default)]
    pub message: String,
    #[serde(alias = "Settings", default)]
    pub settings: Vec<DisplaySetting>,
}

impl FormatRequest {
    pub fn new(message: impl Into<String>, settings: Vec<DisplaySetting>) -> Self {
        Self {
            message: message.into(),
            settings,
        }
    }

    /// Rejects a blank message or an empty settings list.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.message.trim().is_empty() || self.settings.is_empty() {
            return Err(FormatError::InvalidPayload);
        }
        Ok(())
    }
}
