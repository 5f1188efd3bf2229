//! Output format selection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// `--json` always wins; otherwise the configured format is used.
    pub fn resolve(json_flag: bool, configured: OutputFormat) -> Self {
        if json_flag { OutputFormat::Json } else { configured }
    }

    pub fn is_json(self) -> bool {
        self == OutputFormat::Json
    }
}
