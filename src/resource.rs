// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 资源与协商服务模块
//!
//! 协商核心只负责挑选变体；本模块把它接入外围：
//! - `Resource` 枚举自身的变体，并按变体产出拥有所有权的表示（字节缓冲区）。
//! - `Negotiator` 读取偏好标头，调用核心算法，并把结果映射为状态码：
//!   `NotFound` → 404，`NotAcceptable` → 406（附带可用变体列表），
//!   `Selected` → 200 和对应的表示。

use bytes::Bytes;
use log::{debug, info, warn};

use crate::{
    config::Config,
    exception::Exception,
    header::{language_preferences, media_type_preferences},
    negotiator::{select_best_variant, NegotiationResult},
    param::STATUS_CODES,
    util::HtmlBuilder,
    variant::Variant,
};

/// 某个变体的具体表示。内容以 `Bytes` 持有，随表示一起释放。
#[derive(Debug, Clone, PartialEq)]
pub struct Representation {
    variant: Variant,
    content: Bytes,
}

impl Representation {
    pub fn new(variant: Variant, content: impl Into<Bytes>) -> Self {
        Self {
            variant,
            content: content.into(),
        }
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

/// 可协商的资源。
#[cfg_attr(test, mockall::automock)]
pub trait Resource {
    /// 资源当前可以提供的全部变体，顺序决定平局时的胜出者。
    fn variants(&self) -> Vec<Variant>;

    /// 产出指定变体的表示；资源无法提供时返回 `None`。
    fn representation(&self, variant: &Variant) -> Option<Representation>;
}

/// 协商之后的响应内容。
#[derive(Debug, Clone, PartialEq)]
pub struct NegotiatedResponse {
    status_code: u16,
    information: String,
    content_type: String,
    content: Bytes,
    variant: Option<Variant>,
}

impl NegotiatedResponse {
    fn from_representation(representation: Representation) -> Self {
        let content_type = representation.variant().media_type().to_string();
        let variant = representation.variant().clone();
        Self {
            status_code: 200,
            information: reason_phrase(200),
            content_type,
            content: representation.into_content(),
            variant: Some(variant),
        }
    }

    fn from_page(status_code: u16, page: HtmlBuilder) -> Self {
        Self {
            status_code,
            information: reason_phrase(status_code),
            content_type: "text/html; charset=utf-8".to_string(),
            content: Bytes::from(page.build()),
            variant: None,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn information(&self) -> &str {
        &self.information
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// 被选中的变体，仅在 200 时存在。
    pub fn variant(&self) -> Option<&Variant> {
        self.variant.as_ref()
    }
}

fn reason_phrase(code: u16) -> String {
    STATUS_CODES
        .get(&code)
        .copied()
        .unwrap_or("Unknown Status")
        .to_string()
}

/// 协商服务。配置在构造时显式传入，不读取任何全局状态。
#[derive(Debug, Clone, Default)]
pub struct Negotiator {
    config: Config,
}

impl Negotiator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 读取 `Accept` / `Accept-Language` 标头（`None` 表示标头缺失），在给定变体中选择。
    pub fn negotiate<'a>(
        &self,
        variants: &'a [Variant],
        accept: Option<&str>,
        accept_language: Option<&str>,
    ) -> Result<NegotiationResult<'a>, Exception> {
        let media_prefs = media_type_preferences(accept, &self.config)?;
        let language_prefs = language_preferences(accept_language, &self.config)?;
        Ok(select_best_variant(variants, &media_prefs, &language_prefs))
    }

    /// 对资源完成一次协商并生成响应。标头无法解析时返回错误，由调用方决定是否回应 400。
    pub fn respond(
        &self,
        resource: &dyn Resource,
        accept: Option<&str>,
        accept_language: Option<&str>,
        id: u128,
    ) -> Result<NegotiatedResponse, Exception> {
        let variants = resource.variants();
        debug!("[ID{}]资源提供{}个变体", id, variants.len());

        let response = match self.negotiate(&variants, accept, accept_language)? {
            NegotiationResult::NotFound => {
                warn!("[ID{}]资源没有任何变体，返回404", id);
                NegotiatedResponse::from_page(404, HtmlBuilder::from_status_code(404))
            }
            NegotiationResult::NotAcceptable => {
                warn!("[ID{}]没有变体满足客户端偏好，返回406", id);
                NegotiatedResponse::from_page(406, HtmlBuilder::from_variants(406, &variants))
            }
            NegotiationResult::Selected(variant) => match resource.representation(variant) {
                Some(representation) => {
                    info!("[ID{}]选中变体{}", id, variant);
                    NegotiatedResponse::from_representation(representation)
                }
                None => {
                    warn!("[ID{}]资源无法提供选中的变体{}，返回404", id, variant);
                    NegotiatedResponse::from_page(404, HtmlBuilder::from_status_code(404))
                }
            },
        };
        Ok(response)
    }
}
