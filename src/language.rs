// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 语言标签模块
//!
//! 语言标签由主标签和可选的子标签组成，例如 `en-US`。主标签可以是通配符 `*`，
//! 此时子标签必须为空；带子标签的 `*` 仍然可以构造，但在协商中永远不会匹配。

use std::fmt;

use serde_derive::{Deserialize, Serialize};

use crate::{exception::Exception, param::WILDCARD};

/// 语言或语言范围。两个标签都统一转为小写。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language {
    main_tag: String,
    sub_tag: Option<String>,
}

impl Language {
    pub fn new(main_tag: impl Into<String>) -> Self {
        Self {
            main_tag: main_tag.into().to_lowercase(),
            sub_tag: None,
        }
    }

    pub fn with_sub_tag(main_tag: impl Into<String>, sub_tag: impl Into<String>) -> Self {
        Self {
            main_tag: main_tag.into().to_lowercase(),
            sub_tag: Some(sub_tag.into().to_lowercase()),
        }
    }

    /// `*`
    pub fn all() -> Self {
        Self::new(WILDCARD)
    }

    /// 解析 `en`、`en-US`、`zh-Hant-TW` 等标签，第一个 `-` 之后的全部内容作为子标签。
    pub fn parse(s: &str) -> Result<Self, Exception> {
        let tag = s.trim();
        if tag.is_empty() {
            return Err(Exception::InvalidLanguage(s.to_string()));
        }
        match tag.split_once('-') {
            Some((main, _)) if main.is_empty() => Err(Exception::InvalidLanguage(s.to_string())),
            Some((main, sub)) if sub.is_empty() => Ok(Self::new(main)),
            Some((main, sub)) => Ok(Self::with_sub_tag(main, sub)),
            None => Ok(Self::new(tag)),
        }
    }

    pub fn main_tag(&self) -> &str {
        &self.main_tag
    }

    pub fn sub_tag(&self) -> Option<&str> {
        self.sub_tag.as_deref()
    }

    /// 与媒体类型的主/子类型比较规则相同：各部分相同或一方为通配符。
    /// 缺失的子标签视为不做限制。
    pub fn is_compatible(&self, other: &Language) -> bool {
        if self.main_tag == WILDCARD || other.main_tag == WILDCARD {
            return true;
        }
        if self.main_tag != other.main_tag {
            return false;
        }
        match (&self.sub_tag, &other.sub_tag) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sub_tag {
            Some(sub) => write!(f, "{}-{}", self.main_tag, sub),
            None => write!(f, "{}", self.main_tag),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = Exception;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Language {
    type Error = Exception;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.to_string()
    }
}
