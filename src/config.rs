use serde_derive::Deserialize;
use serde_derive::Serialize;

use log::{error, info, warn};
use std::fs::File;
use std::io::prelude::*;

use crate::{
    exception::Exception,
    language::Language,
    media_type::MediaType,
    param::{DEFAULT_LANGUAGE_RANGE, DEFAULT_MEDIA_RANGE},
    variant::{file_name_metadata, Variant},
};

/// 变体清单中的一项：要么给出文件名由扩展名推导，要么显式给出媒体类型和语言。
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct VariantEntry {
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    media_type: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

impl VariantEntry {
    pub fn from_file(file: &str) -> Self {
        Self {
            file: Some(file.to_string()),
            ..Default::default()
        }
    }

    pub fn explicit(media_type: &str, language: Option<&str>) -> Self {
        Self {
            file: None,
            media_type: Some(media_type.to_string()),
            language: language.map(str::to_string),
        }
    }

    /// 显式给出的字段会覆盖从文件名推导出的对应字段。
    fn to_variant(&self, index: usize) -> Result<Variant, Exception> {
        let (derived_media_type, derived_language) = match &self.file {
            Some(file) => file_name_metadata(file)?,
            None => (None, None),
        };

        let media_type = match (&self.media_type, derived_media_type, &self.file) {
            (Some(mt), _, _) => MediaType::parse(mt)?,
            (None, Some(mt), _) => mt,
            (None, None, Some(file)) => return Err(Exception::UnknownExtension(file.clone())),
            (None, None, None) => {
                return Err(Exception::InvalidVariantEntry {
                    index,
                    reason: "either `file` or `media_type` is required".to_string(),
                })
            }
        };
        let language = match &self.language {
            Some(tag) => Some(Language::parse(tag)?),
            None => derived_language,
        };

        if !media_type.is_concrete() {
            warn!("变体#{}的媒体类型{}包含通配符", index, media_type);
        }

        Ok(match language {
            Some(language) => Variant::with_language(media_type, language),
            None => Variant::new(media_type),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_media_range")]
    default_media_range: String,
    #[serde(default = "default_language_range")]
    default_language_range: String,
    #[serde(default)]
    ignore_invalid_preferences: bool,
    #[serde(default)]
    variants: Vec<VariantEntry>,
}

fn default_media_range() -> String {
    DEFAULT_MEDIA_RANGE.to_string()
}

fn default_language_range() -> String {
    DEFAULT_LANGUAGE_RANGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            default_media_range: default_media_range(),
            default_language_range: default_language_range(),
            ignore_invalid_preferences: false,
            variants: Vec::new(),
        }
    }

    pub fn from_toml(filename: &str) -> Result<Self, Exception> {
        let mut file = File::open(filename).map_err(|e| Exception::ConfigRead {
            path: filename.to_string(),
            reason: e.to_string(),
        })?;
        let mut str_val = String::new();
        file.read_to_string(&mut str_val)
            .map_err(|e| Exception::ConfigRead {
                path: filename.to_string(),
                reason: e.to_string(),
            })?;

        let config: Config = match toml::from_str(&str_val) {
            Ok(t) => t,
            Err(e) => {
                error!("无法成功从配置文件构建配置对象，使用默认配置：{}", e);
                Config::new()
            }
        };
        info!("配置文件{}已载入，共{}个变体", filename, config.variants.len());
        Ok(config)
    }

    pub fn with_ignore_invalid_preferences(mut self, ignore: bool) -> Self {
        self.ignore_invalid_preferences = ignore;
        self
    }

    pub fn with_variant(mut self, entry: VariantEntry) -> Self {
        self.variants.push(entry);
        self
    }
}

impl Config {
    pub fn default_media_range(&self) -> &str {
        &self.default_media_range
    }

    pub fn default_language_range(&self) -> &str {
        &self.default_language_range
    }

    pub fn ignore_invalid_preferences(&self) -> bool {
        self.ignore_invalid_preferences
    }

    /// 把变体清单转换为变体列表，保持清单中的顺序（平局时靠前者胜出）。
    pub fn variants(&self) -> Result<Vec<Variant>, Exception> {
        self.variants
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.to_variant(index))
            .collect()
    }
}
