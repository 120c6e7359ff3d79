// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 偏好标头读取模块
//!
//! 将 `Accept` 和 `Accept-Language` 标头的取值解析为有序的偏好列表：
//! 1. 以顶层逗号拆分元素（引号字符串内部的逗号和分号不参与拆分）。
//! 2. 每个元素以顶层分号拆分出元数据名称和参数。
//! 3. `q` 参数之前的参数属于媒体类型本身，之后的扩展参数被丢弃。
//! 4. 空元素被忽略；非法的质量因子会导致读取失败，除非开启了宽松模式。
//!
//! 标头缺失与标头为空的语义不同：缺失时使用配置中的默认范围（`*/*` 或 `*`），
//! 为空时得到空列表。

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;

use crate::{
    config::Config,
    exception::Exception,
    language::Language,
    media_type::{MediaType, Parameter},
    preference::{LanguagePreference, MediaTypePreference, Preference},
};

lazy_static! {
    /// HTTP `qvalue` 语法：0 到 1 之间，最多带一个小数点。
    static ref QVALUE: Regex = Regex::new(r"^(?:0(?:\.[0-9]*)?|1(?:\.0*)?)$").unwrap();
}

/// 解析质量因子，取值必须在 `[0, 1]` 区间内。
pub fn read_quality(value: &str) -> Result<f32, Exception> {
    let value = value.trim();
    if !QVALUE.is_match(value) {
        return Err(Exception::InvalidQuality(value.to_string()));
    }
    value
        .parse::<f32>()
        .map_err(|_| Exception::InvalidQuality(value.to_string()))
}

/// 标头中的一个元素：元数据名称、媒体参数和质量因子。
#[derive(Debug, Clone, PartialEq)]
struct HeaderElement {
    name: String,
    parameters: Vec<Parameter>,
    quality: f32,
}

/// 按顶层分隔符拆分，引号字符串（支持 `\` 转义）内部的分隔符不生效。
/// 返回拆分结果以及字符串结束时是否仍处于引号内部。
fn split_top_level(s: &str, separator: char) -> (Vec<&str>, bool) {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            c if c == separator && !quoted => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    (parts, quoted)
}

fn unquote(value: &str) -> String {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => {
            let mut result = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        result.push(next);
                    }
                } else {
                    result.push(c);
                }
            }
            result
        }
        None => value.to_string(),
    }
}

/// 解析单个元素，空元素返回 `Ok(None)`。
fn read_element(raw: &str) -> Result<Option<HeaderElement>, Exception> {
    if let Some(c) = raw.chars().find(|c| c.is_control() && *c != '\t') {
        return Err(Exception::UnexpectedCharacter(c));
    }
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let (segments, _) = split_top_level(raw, ';');
    let name: String = segments[0].chars().filter(|c| !c.is_whitespace()).collect();
    if name.is_empty() {
        return Err(Exception::EmptyMetadataName);
    }

    let mut parameters = Vec::new();
    let mut quality = None;
    for segment in &segments[1..] {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (param_name, param_value) = match segment.split_once('=') {
            Some((n, v)) => (n.trim(), v.trim()),
            None => (segment, ""),
        };
        if quality.is_none() {
            if param_name.eq_ignore_ascii_case("q") {
                quality = Some(read_quality(param_value)?);
            } else {
                parameters.push(Parameter::new(param_name, unquote(param_value)));
            }
        }
        // `q` 之后的是扩展参数，不属于元数据
    }

    Ok(Some(HeaderElement {
        name,
        parameters,
        quality: quality.unwrap_or(1.0),
    }))
}

/// 偏好标头读取器。
#[derive(Debug, Clone, Copy)]
pub struct PreferenceReader<'h> {
    header: &'h str,
    lenient: bool,
}

impl<'h> PreferenceReader<'h> {
    pub fn new(header: &'h str) -> Self {
        Self {
            header,
            lenient: false,
        }
    }

    /// 宽松模式下，解析失败的元素会被记录并跳过，而不是让整个标头读取失败。
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    fn read_elements<T>(
        &self,
        mut build: impl FnMut(HeaderElement) -> Result<Preference<T>, Exception>,
    ) -> Result<Vec<Preference<T>>, Exception> {
        let (raw_elements, unterminated) = split_top_level(self.header, ',');
        let last = raw_elements.len() - 1;
        let mut result = Vec::with_capacity(raw_elements.len());

        for (index, raw) in raw_elements.into_iter().enumerate() {
            let parsed = if unterminated && index == last {
                Err(Exception::UnterminatedQuotedString)
            } else {
                read_element(raw).and_then(|element| element.map(&mut build).transpose())
            };
            match parsed {
                Ok(Some(preference)) => result.push(preference),
                Ok(None) => {}
                Err(e) if self.lenient => {
                    warn!("忽略无法解析的偏好元素{:?}：{}", raw.trim(), e);
                }
                Err(e) => return Err(e),
            }
        }
        debug!("从标头{:?}读取到{}个偏好", self.header, result.len());
        Ok(result)
    }

    /// 读取 `Accept` 标头。
    pub fn read_media_types(&self) -> Result<Vec<MediaTypePreference>, Exception> {
        self.read_elements(|element| {
            let media_type = MediaType::parse(&element.name)?.with_parameters(element.parameters);
            Ok(Preference::with_quality(media_type, element.quality))
        })
    }

    /// 读取 `Accept-Language` 标头，`q` 以外的参数被忽略。
    pub fn read_languages(&self) -> Result<Vec<LanguagePreference>, Exception> {
        self.read_elements(|element| {
            let language = Language::parse(&element.name)?;
            Ok(Preference::with_quality(language, element.quality))
        })
    }
}

/// 根据 `Accept` 标头得到媒体偏好，标头缺失时使用配置中的默认媒体范围。
pub fn media_type_preferences(
    header: Option<&str>,
    config: &Config,
) -> Result<Vec<MediaTypePreference>, Exception> {
    match header {
        Some(h) => PreferenceReader::new(h)
            .lenient(config.ignore_invalid_preferences())
            .read_media_types(),
        None => Ok(vec![Preference::new(MediaType::parse(
            config.default_media_range(),
        )?)]),
    }
}

/// 根据 `Accept-Language` 标头得到语言偏好，标头缺失时使用配置中的默认语言范围。
pub fn language_preferences(
    header: Option<&str>,
    config: &Config,
) -> Result<Vec<LanguagePreference>, Exception> {
    match header {
        Some(h) => PreferenceReader::new(h)
            .lenient(config.ignore_invalid_preferences())
            .read_languages(),
        None => Ok(vec![Preference::new(Language::parse(
            config.default_language_range(),
        )?)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_quality() {
        assert_eq!(read_quality("1"), Ok(1.0));
        assert_eq!(read_quality("0.5"), Ok(0.5));
        assert_eq!(read_quality(" 0.125 "), Ok(0.125));
        assert_eq!(read_quality("1.000"), Ok(1.0));
        assert_eq!(read_quality("0"), Ok(0.0));
    }

    #[test]
    fn test_read_quality_rejects_out_of_range() {
        for bad in ["1.5", "2", "-0.1", "abc", "", "1.01", "0.5e1"] {
            assert_eq!(
                read_quality(bad),
                Err(Exception::InvalidQuality(bad.trim().to_string())),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_split_respects_quotes() {
        let (parts, unterminated) = split_top_level(r#"a;x="1,2", b"#, ',');
        assert_eq!(parts, vec![r#"a;x="1,2""#, " b"]);
        assert!(!unterminated);

        let (_, unterminated) = split_top_level(r#"a;x="1, b"#, ',');
        assert!(unterminated);
    }

    #[test]
    fn test_unquote_handles_escapes() {
        assert_eq!(unquote(r#""a\"b""#), "a\"b");
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn test_read_element_splits_media_and_extension_params() {
        let element = read_element("text/html; level=1; q=0.7; ext=foo").unwrap().unwrap();
        assert_eq!(element.name, "text/html");
        assert_eq!(element.parameters, vec![Parameter::new("level", "1")]);
        assert_eq!(element.quality, 0.7);
    }

    #[test]
    fn test_read_element_ignores_spaces_in_name() {
        let element = read_element("  text / plain ").unwrap().unwrap();
        assert_eq!(element.name, "text/plain");
        assert_eq!(element.quality, 1.0);
    }

    #[test]
    fn test_read_element_empty_name() {
        assert_eq!(read_element(";q=0.5"), Err(Exception::EmptyMetadataName));
        assert_eq!(read_element("   "), Ok(None));
    }

    #[test]
    fn test_read_element_control_character() {
        assert_eq!(
            read_element("text/html\u{0}"),
            Err(Exception::UnexpectedCharacter('\u{0}'))
        );
    }

    #[test]
    fn test_lenient_skips_bad_elements() {
        let prefs = PreferenceReader::new("text/html;q=5, application/json")
            .lenient(true)
            .read_media_types()
            .unwrap();
        assert_eq!(prefs.len(), 1);
        assert_eq!(prefs[0].metadata(), &MediaType::new("application", "json"));
    }

    #[test]
    fn test_unterminated_quote() {
        let reader = PreferenceReader::new(r#"text/html, text/plain;x="oops"#);
        assert_eq!(
            reader.read_media_types(),
            Err(Exception::UnterminatedQuotedString)
        );
        let prefs = reader.lenient(true).read_media_types().unwrap();
        assert_eq!(prefs.len(), 1);
    }
}
