//! Base layer for every merge: the struct defaults serialized into a source,
//! so that partial tables from later layers only override the keys they name.

use crate::config::IndexerConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let defaults = Config::try_from(&IndexerConfig::default())?;
    Ok(Config::builder().add_source(defaults))
}
