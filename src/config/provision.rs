use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "propcrm.toml";

/// Settings written by `admin init` and read by every later command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionConfig {
    /// Workspace whose reference data seeds every new workspace.
    pub template_workspace_id: String,
}

impl ProvisionConfig {
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: ProvisionConfig = toml::from_str(&content)?;

        if config.template_workspace_id.trim().is_empty() {
            return Err(Error::Config(
                "template_workspace_id cannot be empty".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(data_dir.join(CONFIG_FILE_NAME), content)?;
        Ok(())
    }
}
