use crate::domain::{config::Config, error::{PaciError, PaciResult}};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file name looked up in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "Pacifile";

/// Decoder picked for a settings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoder {
    Json,
    Toml,
}

impl Decoder {
    /// Pick the decoder from the file extension, or sniff the content when the
    /// extension names no known format.
    pub fn detect(path: &Path, content: &str) -> Self {
        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_ascii_lowercase().as_str() {
                "json" => Some(Decoder::Json),
                "toml" => Some(Decoder::Toml),
                _ => None,
            });

        by_extension.unwrap_or_else(|| match content.trim_start().as_bytes().first() {
            Some(b'{') => Decoder::Json,
            _ => Decoder::Toml,
        })
    }

    fn name(self) -> &'static str {
        match self {
            Decoder::Json => "JSON",
            Decoder::Toml => "TOML",
        }
    }

    fn decode(self, content: &str) -> PaciResult<Value> {
        match self {
            Decoder::Json => {
                serde_json::from_str(content).map_err(|e| PaciError::decode(self.name(), e))
            }
            Decoder::Toml => toml::from_str(content).map_err(|e| PaciError::decode(self.name(), e)),
        }
    }
}

/// Decode a JSON or TOML file over `target`.
///
/// Keys present in the file replace the matching fields, nested records merge
/// key by key and everything else in `target` is kept. A blank file leaves
/// `target` untouched. The loader knows nothing of the shape it fills; the
/// caller's type supplies the fields.
pub fn load_into<T>(path: &Path, target: &mut T) -> PaciResult<()>
where
    T: Serialize + DeserializeOwned,
{
    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes).map_err(|e| PaciError::decode("UTF-8", e))?;
    if content.trim().is_empty() {
        debug!("{} is empty, keeping defaults", path.display());
        return Ok(());
    }

    let decoder = Decoder::detect(path, &content);
    debug!("Decoding {} as {}", path.display(), decoder.name());
    let overlay = decoder.decode(&content)?;

    let mut merged =
        serde_json::to_value(&*target).map_err(|e| PaciError::Encode(e.to_string()))?;
    merge(&mut merged, overlay);
    *target = serde_json::from_value(merged).map_err(|e| PaciError::decode(decoder.name(), e))?;
    Ok(())
}

/// Objects merge recursively, any other overlay value replaces the base.
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                let key = canonical_key(base, key);
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Existing key the overlay key refers to. Field aliases such as `BaseURL`
/// for `base_url` differ only in case and separators.
fn canonical_key(base: &Map<String, Value>, key: String) -> String {
    if base.contains_key(&key) {
        return key;
    }
    let folded = fold_key(&key);
    base.keys()
        .find(|existing| fold_key(existing) == folded)
        .cloned()
        .unwrap_or(key)
}

fn fold_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a manager for an explicit path, or the first default location
    /// that exists.
    pub fn new(explicit: Option<PathBuf>) -> PaciResult<Self> {
        let config_path = match explicit {
            Some(path) => path,
            None => Self::find_default_config_path()?,
        };
        Ok(Self { config_path })
    }

    /// Load and validate the configuration
    pub fn load_config(&self) -> PaciResult<Config> {
        let mut config = Config::default();
        load_into(&self.config_path, &mut config).map_err(|e| match e {
            PaciError::Io(err) => PaciError::Config {
                message: format!(
                    "Failed to read config file {}: {}",
                    self.config_path.display(),
                    err
                ),
            },
            other => other,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// `./Pacifile`, then `<config dir>/pacicli/Pacifile`
    fn find_default_config_path() -> PaciResult<PathBuf> {
        let local = PathBuf::from(DEFAULT_CONFIG_NAME);
        if local.exists() {
            return Ok(local);
        }

        let user = Self::get_user_config_path()?;
        if user.exists() {
            return Ok(user);
        }

        Err(PaciError::Config {
            message: format!(
                "No config file found. Create ./{} or {}, or pass --config",
                DEFAULT_CONFIG_NAME,
                user.display()
            ),
        })
    }

    fn get_user_config_path() -> PaciResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| PaciError::Config {
            message: "Could not determine user config directory".to_string(),
        })?;

        Ok(dir.join("pacicli").join(DEFAULT_CONFIG_NAME))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
