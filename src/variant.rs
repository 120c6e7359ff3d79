// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 变体模块
//!
//! 变体描述资源的一种可用表示：一个必需的媒体类型和一个可选的语言。
//! 除了直接构造，还可以像目录服务那样从 `index.html.fr` 这类文件名推导变体。

use std::fmt;

use log::debug;
use serde_derive::{Deserialize, Serialize};

use crate::{
    exception::Exception,
    language::Language,
    media_type::MediaType,
    param::{LANGUAGE_EXTENSIONS, MEDIA_TYPE_EXTENSIONS},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<Language>,
}

impl Variant {
    pub fn new(media_type: MediaType) -> Self {
        Self {
            media_type,
            language: None,
        }
    }

    pub fn with_language(media_type: MediaType, language: Language) -> Self {
        Self {
            media_type,
            language: Some(language),
        }
    }

    /// 根据文件名的扩展名推导变体元数据。
    ///
    /// 第一个 `.` 之前的部分是基础名，其余每个扩展名分别在媒体类型表和语言表中查找，
    /// 与顺序无关：`index.html.en` 和 `index.en.html` 得到相同的变体。
    /// 未知扩展名被忽略；同一维度出现多次时以最后一次为准。
    pub fn from_file_name(file_name: &str) -> Result<Self, Exception> {
        match file_name_metadata(file_name)? {
            (Some(media_type), language) => Ok(Self {
                media_type,
                language,
            }),
            (None, _) => Err(Exception::UnknownExtension(file_name.to_string())),
        }
    }

    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    pub fn language(&self) -> Option<&Language> {
        self.language.as_ref()
    }
}

/// 逐个扩展名查表，返回识别出的媒体类型和语言，两者都可能缺失。
pub(crate) fn file_name_metadata(
    file_name: &str,
) -> Result<(Option<MediaType>, Option<Language>), Exception> {
    let mut media_type = None;
    let mut language = None;

    for extension in file_name.split('.').skip(1) {
        let extension = extension.to_lowercase();
        if let Some(mt) = MEDIA_TYPE_EXTENSIONS.get(extension.as_str()) {
            media_type = Some(MediaType::parse(mt)?);
        } else if let Some(tag) = LANGUAGE_EXTENSIONS.get(extension.as_str()) {
            language = Some(Language::parse(tag)?);
        } else {
            debug!("忽略未知扩展名 .{}（{}）", extension, file_name);
        }
    }
    Ok((media_type, language))
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(language) => write!(f, "{} ({})", self.media_type, language),
            None => write!(f, "{}", self.media_type),
        }
    }
}
