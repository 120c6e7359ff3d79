// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 协商参数与常量模块
//!
//! 该模块定义了内容协商引擎所依赖的常量和静态表，包括：
//! - 协商打分所使用的固定分值。
//! - 文件扩展名到媒体类型、语言的映射表。
//! - 协商结果对应的 HTTP 状态码及其原因短语（Reason Phrase）。

use lazy_static::lazy_static;
use std::collections::HashMap;

/// 通配符，既用于媒体范围（`*/*`），也用于语言范围（`*`）
pub const WILDCARD: &str = "*";

/// 标头缺失时使用的默认媒体范围
pub const DEFAULT_MEDIA_RANGE: &str = "*/*";

/// 标头缺失时使用的默认语言范围
pub const DEFAULT_LANGUAGE_RANGE: &str = "*";

/// 默认配置文件路径
pub const CONFIG_PATH: &str = "config/negotiation.toml";

/// 默认日志配置文件路径
pub const LOG_CONFIG_PATH: &str = "config/log4rs.yaml";

// 以下分值沿用 Apache httpd 风格的协商算法，改变任何一个都会改变可观察的协商结果。

/// 语言主标签相同
pub const LANGUAGE_MAIN_TAG_SCORE: u32 = 100;
/// 语言子标签相同（包括双方都没有子标签）
pub const LANGUAGE_SUB_TAG_SCORE: u32 = 10;
/// 裸 `*` 语言范围，最低的有效分值
pub const LANGUAGE_WILDCARD_SCORE: u32 = 1;
/// 媒体主类型相同
pub const MEDIA_MAIN_TYPE_SCORE: u32 = 1000;
/// 媒体子类型相同
pub const MEDIA_SUB_TYPE_SCORE: u32 = 100;
/// 每个完全相同的媒体参数
pub const MEDIA_PARAMETER_SCORE: u32 = 1;
/// 语言质量因子在综合质量中的权重
pub const LANGUAGE_QUALITY_WEIGHT: f32 = 10.0;

lazy_static! {
    /// 协商结果可能对应的 HTTP 状态码与其标准原因短语映射表。
    ///
    /// 参考标准：[RFC 9110: HTTP Semantics](https://www.rfc-editor.org/rfc/rfc9110.html)。
    pub static ref STATUS_CODES: HashMap<u16, &'static str> = {
        let mut map = HashMap::new();
        map.insert(200, "OK");
        map.insert(300, "Multiple Choices");
        map.insert(400, "Bad Request");
        map.insert(404, "Not Found");
        map.insert(406, "Not Acceptable");
        map.insert(500, "Internal Server Error");
        map
    };
}

lazy_static! {
    /// 文件后缀名到媒体类型（Media Type）的映射表。
    ///
    /// 用于从 `index.html.en` 这类文件名推导出变体的媒体类型。
    pub static ref MEDIA_TYPE_EXTENSIONS: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("atom", "application/atom+xml");
        map.insert("css", "text/css");
        map.insert("csv", "text/csv");
        map.insert("doc", "application/msword");
        map.insert("gif", "image/gif");
        map.insert("htm", "text/html");
        map.insert("html", "text/html");
        map.insert("ico", "image/x-icon");
        map.insert("jpeg", "image/jpeg");
        map.insert("jpg", "image/jpeg");
        map.insert("js", "application/javascript");
        map.insert("json", "application/json");
        map.insert("pdf", "application/pdf");
        map.insert("png", "image/png");
        map.insert("rdf", "application/rdf+xml");
        map.insert("rss", "application/rss+xml");
        map.insert("svg", "image/svg+xml");
        map.insert("txt", "text/plain");
        map.insert("wadl", "application/vnd.sun.wadl+xml");
        map.insert("xhtml", "application/xhtml+xml");
        map.insert("xml", "text/xml");
        map.insert("xsl", "text/xsl");
        map.insert("yaml", "application/yaml");
        map.insert("zip", "application/zip");
        map
    };
}

lazy_static! {
    /// 文件后缀名到语言标签的映射表。
    pub static ref LANGUAGE_EXTENSIONS: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("ar", "ar");
        map.insert("de", "de");
        map.insert("en", "en");
        map.insert("en-gb", "en-gb");
        map.insert("en-us", "en-us");
        map.insert("es", "es");
        map.insert("fr", "fr");
        map.insert("it", "it");
        map.insert("ja", "ja");
        map.insert("ko", "ko");
        map.insert("nl", "nl");
        map.insert("pt", "pt");
        map.insert("ru", "ru");
        map.insert("zh", "zh");
        map
    };
}
