// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 内容协商模块
//!
//! 给定资源的候选变体列表和客户端按维度给出的偏好列表，选出唯一的最佳变体。
//! 打分方式与 Apache httpd 的协商算法一致：
//!
//! 1. 对每个带语言的变体，计算每个语言偏好的匹配分（主标签 100、子标签 10、裸 `*` 1），
//!    记住得分最高的兼容偏好。没有兼容语言偏好的变体不参与后续评估。
//! 2. 对通过语言门槛的变体，计算每个媒体范围的匹配分（主类型 1000、子类型 100、
//!    每个相同参数 1），记住得分最高的兼容偏好。
//! 3. 变体的综合质量 = 最佳媒体偏好的质量 + 最佳语言偏好的质量 × 10。
//!    只有严格更高的综合质量才能替换当前最佳变体，平局时先出现者胜出。
//!
//! 该过程是纯函数：只读借用输入，不持有任何共享状态，可以在多个线程中并发调用。

use log::debug;
use serde_derive::Serialize;

use crate::{
    language::Language,
    media_type::MediaType,
    param::*,
    preference::{LanguagePreference, MediaTypePreference, Preference},
    variant::Variant,
};

/// 一次协商的结果。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "variant", rename_all = "snake_case")]
pub enum NegotiationResult<'a> {
    /// 选中的变体
    Selected(&'a Variant),
    /// 资源没有任何变体
    NotFound,
    /// 有变体，但没有一个满足客户端偏好
    NotAcceptable,
}

impl<'a> NegotiationResult<'a> {
    /// 在 HTTP 语境下对应的状态码。
    pub fn status_code(&self) -> u16 {
        match self {
            NegotiationResult::Selected(_) => 200,
            NegotiationResult::NotFound => 404,
            NegotiationResult::NotAcceptable => 406,
        }
    }

    pub fn selected(&self) -> Option<&'a Variant> {
        match self {
            NegotiationResult::Selected(variant) => Some(variant),
            _ => None,
        }
    }
}

/// 某一维度上得分最高的兼容偏好。
struct BestPreference<'p, T> {
    preference: &'p Preference<T>,
    score: u32,
}

/// 记录更优的偏好：第一个兼容偏好总会被记录，之后只有严格更高的分数才会替换。
fn consider<'p, T>(
    best: &mut Option<BestPreference<'p, T>>,
    preference: &'p Preference<T>,
    score: u32,
) {
    if best.as_ref().map_or(true, |b| score > b.score) {
        *best = Some(BestPreference { preference, score });
    }
}

/// 语言偏好对变体语言的匹配分，不兼容时返回 `None`。
fn language_score(variant: &Language, range: &Language) -> Option<u32> {
    let mut score = if variant.main_tag() == range.main_tag() {
        LANGUAGE_MAIN_TAG_SCORE
    } else if range.main_tag() != WILDCARD {
        return None;
    } else if range.sub_tag().is_some() {
        // 只有裸 `*` 是合法的语言范围
        return None;
    } else {
        LANGUAGE_WILDCARD_SCORE
    };

    match (variant.sub_tag(), range.sub_tag()) {
        (None, None) => score += LANGUAGE_SUB_TAG_SCORE,
        (Some(a), Some(b)) if a == b => score += LANGUAGE_SUB_TAG_SCORE,
        (Some(_), Some(_)) => return None,
        // 一方没有子标签：分数不变，仍然兼容
        _ => {}
    }
    Some(score)
}

/// 媒体范围对变体媒体类型的匹配分，不兼容时返回 `None`。
fn media_type_score(variant: &MediaType, range: &MediaType) -> Option<u32> {
    let mut score = if variant.main_type() == range.main_type() {
        MEDIA_MAIN_TYPE_SCORE
    } else if range.main_type() != WILDCARD {
        return None;
    } else if range.sub_type() != WILDCARD {
        // 不支持 `*/html` 这类范围，只接受 `*/*`
        return None;
    } else {
        0
    };

    if variant.sub_type() == range.sub_type() {
        score += MEDIA_SUB_TYPE_SCORE;
    } else if range.sub_type() != WILDCARD {
        return None;
    }

    score += variant
        .parameters()
        .iter()
        .filter(|p| range.has_parameter(p))
        .count() as u32
        * MEDIA_PARAMETER_SCORE;

    Some(score)
}

/// 从 `variants` 中选出最符合客户端偏好的变体。
///
/// 偏好列表为空时，对应维度上不会有任何偏好被满足（没有语言的变体不受语言维度约束）。
pub fn select_best_variant<'a>(
    variants: &'a [Variant],
    media_type_prefs: &[MediaTypePreference],
    language_prefs: &[LanguagePreference],
) -> NegotiationResult<'a> {
    if variants.is_empty() {
        debug!("资源没有可用的变体");
        return NegotiationResult::NotFound;
    }
    debug!(
        "开始协商：{}个变体，{}个媒体偏好，{}个语言偏好",
        variants.len(),
        media_type_prefs.len(),
        language_prefs.len()
    );

    let mut best: Option<(&'a Variant, f32)> = None;

    for variant in variants {
        let mut best_language: Option<BestPreference<Language>> = None;
        if let Some(language) = variant.language() {
            for pref in language_prefs {
                if let Some(score) = language_score(language, pref.metadata()) {
                    consider(&mut best_language, pref, score);
                }
            }
            if best_language.is_none() {
                debug!("变体{}没有兼容的语言偏好，跳过", variant);
                continue;
            }
        }

        let mut best_media_type: Option<BestPreference<MediaType>> = None;
        for pref in media_type_prefs {
            if let Some(score) = media_type_score(variant.media_type(), pref.metadata()) {
                consider(&mut best_media_type, pref, score);
            }
        }

        let Some(best_media_type) = best_media_type else {
            debug!("变体{}没有兼容的媒体偏好，跳过", variant);
            continue;
        };

        let quality = best_media_type.preference.quality()
            + best_language.map_or(0.0, |b| b.preference.quality() * LANGUAGE_QUALITY_WEIGHT);

        if best.map_or(true, |(_, best_quality)| quality > best_quality) {
            best = Some((variant, quality));
        }
    }

    match best {
        Some((variant, quality)) => {
            debug!("选中变体{}，综合质量{}", variant, quality);
            NegotiationResult::Selected(variant)
        }
        None => {
            debug!("没有变体满足客户端偏好");
            NegotiationResult::NotAcceptable
        }
    }
}
