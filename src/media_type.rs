// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 媒体类型模块
//!
//! 媒体类型由主类型、子类型和一组有序参数组成，例如 `text/html; charset=utf-8`。
//! 主类型和子类型都可以是通配符 `*`。

use std::fmt;

use serde_derive::{Deserialize, Serialize};

use crate::{exception::Exception, param::WILDCARD};

/// 媒体类型参数（`name=value`）。名称和取值都参与相等比较。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    name: String,
    value: String,
}

impl Parameter {
    /// 参数名统一转为小写，取值保持原样。
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_lowercase(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// 媒体类型或媒体范围。
///
/// 参数允许重复，比较时逐个进行。序列化为其字符串形式。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaType {
    main_type: String,
    sub_type: String,
    parameters: Vec<Parameter>,
}

impl MediaType {
    /// 构造不带参数的媒体类型，主类型和子类型统一转为小写。
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into().to_lowercase(),
            sub_type: sub_type.into().to_lowercase(),
            parameters: Vec::new(),
        }
    }

    /// `*/*`
    pub fn all() -> Self {
        Self::new(WILDCARD, WILDCARD)
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(Parameter::new(name, value));
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// 解析 `main/sub; name=value` 形式的字符串。
    ///
    /// 没有 `/` 的名称（部分客户端会这样发送）被视为 `main/*`。
    /// 参数取值两侧的引号会被去掉。
    pub fn parse(s: &str) -> Result<Self, Exception> {
        let mut segments = s.split(';');
        let name = segments.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(Exception::InvalidMediaType(s.to_string()));
        }

        let (main_type, sub_type) = match name.split_once('/') {
            Some((main, sub)) => (main.trim(), sub.trim()),
            None => (name, WILDCARD),
        };
        if main_type.is_empty() || sub_type.is_empty() {
            return Err(Exception::InvalidMediaType(s.to_string()));
        }

        let mut media_type = Self::new(main_type, sub_type);
        for segment in segments {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            media_type
                .parameters
                .push(Parameter::new(name.trim(), unquote(value.trim())));
        }
        Ok(media_type)
    }

    pub fn main_type(&self) -> &str {
        &self.main_type
    }

    pub fn sub_type(&self) -> &str {
        &self.sub_type
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// 指定参数（名称和取值都相同）是否出现在本媒体类型的参数中。
    pub fn has_parameter(&self, parameter: &Parameter) -> bool {
        self.parameters.iter().any(|p| p == parameter)
    }

    /// 主类型和子类型是否各自相同，或其中一方为 `*`。
    pub fn is_compatible(&self, other: &MediaType) -> bool {
        let component = |a: &str, b: &str| a == b || a == WILDCARD || b == WILDCARD;
        component(&self.main_type, &other.main_type) && component(&self.sub_type, &other.sub_type)
    }

    /// 是否是具体的媒体类型（主类型和子类型都不是通配符）。
    pub fn is_concrete(&self) -> bool {
        self.main_type != WILDCARD && self.sub_type != WILDCARD
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.main_type, self.sub_type)?;
        for parameter in &self.parameters {
            write!(f, "; {}", parameter)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for MediaType {
    type Err = Exception;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MediaType {
    type Error = Exception;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MediaType> for String {
    fn from(value: MediaType) -> Self {
        value.to_string()
    }
}
