// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 该模块定义了内容协商引擎在读取偏好标头、解析元数据和加载配置时可能出现的异常。
//!
//! ## 设计意图
//! - **错误分类**：涵盖了标头语法错误、元数据映射错误以及配置文件错误。
//! - **协商本身不抛错**：`select_best_variant` 是全函数，`404`/`406` 作为
//!   `NegotiationResult` 的取值返回，而不是 `Exception`。
//! - **用户友好**：通过 `thiserror` 派生 `Display`，确保错误信息可以被安全地记录到日志中。

use thiserror::Error;

/// 协商引擎外围操作中发生的异常类型。
///
/// 该枚举通常作为 `Result` 的 `Err` 部分返回，用于指示处理失败的具体原因。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Exception {
    /// 标头元素在 `;` 之前没有任何元数据名称（例如 `;q=0.5`）。
    #[error("Empty metadata name detected")]
    EmptyMetadataName,
    /// 标头中出现了不允许的字符（控制字符等）。
    #[error("Unexpected character {0:?} detected")]
    UnexpectedCharacter(char),
    /// 引号字符串直到标头结束都没有闭合。
    #[error("Unterminated quoted string")]
    UnterminatedQuotedString,
    /// 质量因子不是合法的 `qvalue`，或者不在 `[0, 1]` 区间内。
    #[error("Invalid quality value {0:?}, value must be between 0 and 1")]
    InvalidQuality(String),
    /// 媒体类型字符串为空或无法拆分出主类型。
    #[error("Invalid media type {0:?}")]
    InvalidMediaType(String),
    /// 语言标签为空或格式非法。
    #[error("Invalid language tag {0:?}")]
    InvalidLanguage(String),
    /// 文件名的扩展名中找不到任何已知的媒体类型。
    #[error("No media type could be derived from file name {0:?}")]
    UnknownExtension(String),
    /// 无法读取配置文件。
    #[error("Couldn't read config file {path}: {reason}")]
    ConfigRead { path: String, reason: String },
    /// 配置文件中的变体清单条目不完整。
    #[error("Invalid variant entry #{index}: {reason}")]
    InvalidVariantEntry { index: usize, reason: String },
}
