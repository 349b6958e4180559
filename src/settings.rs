//! Persistent settings of the configuration builder
//!
//! Settings are stored as a flat list of `<Type>.<field>` keys mapped to string values. Each
//! persisted type lists its fields explicitly through the [Properties] trait.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    str::FromStr,
};

use thiserror::Error;

use crate::models::{FrameTopology, SamplingParameters};

/// Name of the settings file
pub const SETTINGS_FILE_NAME: &str = "hypercon.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("error writing TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// A type which can be saved to and restored from a [SettingsFile]
pub trait Properties {
    /// Prefix of the keys of this type
    const PREFIX: &'static str;

    /// Write all fields of `self` to `file`
    fn store(&self, file: &mut SettingsFile);

    /// Read the fields of `self` present in `file`
    ///
    /// Fields without a matching key keep their current value.
    fn restore(&mut self, file: &SettingsFile) -> Result<(), SettingsError>;
}

macro_rules! impl_properties {
    ($t:ty, $prefix:literal, [$($field:ident),* $(,)?]) => {
        impl Properties for $t {
            const PREFIX: &'static str = $prefix;

            fn store(&self, file: &mut SettingsFile) {
                $(file.set(Self::PREFIX, stringify!($field), &self.$field);)*
            }

            fn restore(&mut self, file: &SettingsFile) -> Result<(), SettingsError> {
                $(file.read(Self::PREFIX, stringify!($field), &mut self.$field)?;)*
                Ok(())
            }
        }
    };
}

impl_properties!(
    FrameTopology,
    "FrameTopology",
    [
        clockwise,
        top_left_corner,
        top_right_corner,
        bottom_left_corner,
        bottom_right_corner,
        top_count,
        bottom_count,
        left_count,
        right_count,
        first_led_offset,
    ]
);

impl_properties!(
    SamplingParameters,
    "SamplingParameters",
    [
        horizontal_depth,
        vertical_depth,
        horizontal_gap,
        vertical_gap,
        overlap_fraction,
    ]
);

/// Flat key-value settings store
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SettingsFile {
    props: BTreeMap<String, String>,
}

impl SettingsFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from the TOML file at `path`
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let full = std::fs::read_to_string(path)?;
        let settings = Self::from_toml(&full)?;

        debug!(path = %path.display(), keys = %settings.len(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to `path`, creating its parent directory if needed
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;

        info!(path = %path.display(), "saved settings");
        Ok(())
    }

    pub fn from_toml(full: &str) -> Result<Self, SettingsError> {
        Ok(Self {
            props: toml::from_str(full)?,
        })
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(&self.props)?)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    /// Store all fields of `value`
    pub fn store<P: Properties>(&mut self, value: &P) {
        value.store(self);
    }

    /// Restore the fields of `value` present in this file
    pub fn restore<P: Properties>(&self, value: &mut P) -> Result<(), SettingsError> {
        value.restore(self)
    }

    fn key(prefix: &str, field: &str) -> String {
        format!("{}.{}", prefix, field)
    }

    fn set(&mut self, prefix: &str, field: &str, value: &impl ToString) {
        self.props.insert(Self::key(prefix, field), value.to_string());
    }

    fn read<T: FromStr>(
        &self,
        prefix: &str,
        field: &str,
        target: &mut T,
    ) -> Result<(), SettingsError> {
        let key = Self::key(prefix, field);

        if let Some(value) = self.props.get(&key) {
            *target = value.trim().parse().map_err(|_| SettingsError::InvalidValue {
                key,
                value: value.clone(),
            })?;
        }

        Ok(())
    }
}

/// Default location of the settings file, in the user configuration directory
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("hypercon").join(SETTINGS_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME))
}
