//! INI configuration adapter backed by `configparser`.

use configparser::ini::Ini;
use std::path::Path;

use crate::domain::error::StockAdvisorError;
use crate::ports::config_port::ConfigPort;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StockAdvisorError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|e| StockAdvisorError::ConfigParse {
            file: path.display().to_string(),
            reason: e,
        })?;
        Ok(FileConfigAdapter { config })
    }

    pub fn from_string(content: &str) -> Result<Self, StockAdvisorError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|e| StockAdvisorError::ConfigParse {
                file: "<inline>".to_string(),
                reason: e,
            })?;
        Ok(FileConfigAdapter { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_double(&self, section: &str, key: &str) -> Option<f64> {
        // getfloat returns Err on unparseable values and Ok(None) on absence;
        // both read as "not usable" here.
        self.config.getfloat(section, key).ok().flatten()
    }
}
