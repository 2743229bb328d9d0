//! Locale data file loading

use crate::bundle::{CatalogBuilder, PluralTemplate, Template};
use crate::error::{I18nError, I18nResult};
use crate::LocaleTag;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Serialization formats accepted for locale data files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
    /// `.toml`
    Toml,
}

impl PayloadFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    fn parse(
        self,
        content: &str,
    ) -> Result<HashMap<String, RawTemplate>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(match self {
            Self::Json => serde_json::from_str(content)?,
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        })
    }
}

/// Template value as written in a data file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTemplate {
    Text(String),
    Plural(RawPlural),
}

#[derive(Debug, Deserialize)]
struct RawPlural {
    #[serde(default = "default_plural_arg")]
    arg: usize,
    #[serde(flatten)]
    cases: BTreeMap<String, String>,
}

fn default_plural_arg() -> usize {
    1
}

/// One data file and the locale it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFile {
    /// Path of the data file
    pub path: PathBuf,
    /// Locale name taken from the file stem, or from the enclosing
    /// directory when the stem is not a language tag
    pub locale_name: String,
    /// Payload format
    pub format: PayloadFormat,
}

/// Loads locale data files from a directory.
///
/// Both `locales/en_US.json` and `locales/en_US/*.json` layouts are
/// accepted. The file stem names the locale; a nested file whose stem is
/// not a language tag (`en_US/main.json`) takes the directory name.
#[derive(Debug, Clone)]
pub struct ResourceManager {
    base_dir: PathBuf,
}

impl ResourceManager {
    /// Create a new ResourceManager
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the base directory for resources
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Enumerate locale data files in a stable order
    pub fn locale_files(&self) -> I18nResult<Vec<LocaleFile>> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(I18nError::DirectoryNotConfigured);
        }
        if !self.base_dir.is_dir() {
            return Err(I18nError::DirectoryNotFound {
                path: self.base_dir.clone(),
            });
        }

        let mut files = Vec::new();
        for path in sorted_entries(&self.base_dir)? {
            if path.is_dir() {
                let Some(dir_name) = file_name(&path) else {
                    continue;
                };
                for nested in sorted_entries(&path)? {
                    if !nested.is_file() {
                        continue;
                    }
                    let Some(format) = supported(&nested) else {
                        continue;
                    };
                    let locale_name = match file_stem(&nested) {
                        Some(stem) if LocaleTag::try_resolve(&stem).is_some() => stem,
                        _ => dir_name.clone(),
                    };
                    files.push(LocaleFile {
                        path: nested,
                        locale_name,
                        format,
                    });
                }
            } else if path.is_file() {
                let Some(format) = supported(&path) else {
                    continue;
                };
                let Some(locale_name) = file_stem(&path) else {
                    continue;
                };
                files.push(LocaleFile {
                    locale_name,
                    path,
                    format,
                });
            }
        }
        Ok(files)
    }

    /// Read and parse one data file
    pub fn load_file(&self, file: &LocaleFile) -> I18nResult<HashMap<String, Template>> {
        debug!("Loading resource file: {:?}", file.path);

        let content = fs::read_to_string(&file.path).map_err(|source| {
            I18nError::ResourceLoadError {
                path: file.path.clone(),
                source,
            }
        })?;

        let raw = file
            .format
            .parse(&content)
            .map_err(|source| I18nError::payload(&file.path, source))?;

        raw.into_iter()
            .map(|(key, value)| -> I18nResult<(String, Template)> {
                let template = match value {
                    RawTemplate::Text(text) => Template::Text(text),
                    RawTemplate::Plural(plural) => {
                        let plural = PluralTemplate::from_cases(plural.arg, plural.cases)
                            .map_err(|source| I18nError::payload(&file.path, source))?;
                        Template::Plural(plural)
                    }
                };
                Ok((key, template))
            })
            .collect()
    }

    /// Register every template found under the base directory into `builder`.
    ///
    /// Stops at the first file that fails; the builder may then hold a
    /// partial catalog and should be discarded.
    pub fn load_into(&self, builder: &mut CatalogBuilder) -> I18nResult<usize> {
        let files = self.locale_files()?;

        for file in &files {
            let messages = self.load_file(file)?;
            let locale = LocaleTag::try_resolve(&file.locale_name).unwrap_or_else(|| {
                warn!(
                    "Locale name {:?} of {:?} is not a language tag, registering as {}",
                    file.locale_name,
                    file.path,
                    LocaleTag::english()
                );
                LocaleTag::english()
            });

            let count = messages.len();
            for (key, template) in messages {
                builder.set_template(&locale, key, template);
            }
            debug!("Registered {} messages for locale {}", count, locale);
        }

        info!(
            "Loaded {} locale files from {:?}",
            files.len(),
            self.base_dir
        );
        Ok(files.len())
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new("locales")
    }
}

fn sorted_entries(dir: &Path) -> I18nResult<Vec<PathBuf>> {
    let read_error = |source| I18nError::ResourceLoadError {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    paths.retain(|path| file_name(path).is_some_and(|name| !name.starts_with('.')));
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

fn supported(path: &Path) -> Option<PayloadFormat> {
    let format = PayloadFormat::from_path(path);
    if format.is_none() {
        debug!("Skipping non-locale file: {:?}", path);
    }
    format
}
