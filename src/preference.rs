// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

use serde_derive::Serialize;

use crate::{language::Language, media_type::MediaType};

/// 客户端声明的一项可接受元数据及其质量因子。
///
/// 质量因子约定在 `[0, 1]` 区间内，越大越优先；默认 1.0。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preference<T> {
    metadata: T,
    quality: f32,
}

impl<T> Preference<T> {
    pub fn new(metadata: T) -> Self {
        Self::with_quality(metadata, 1.0)
    }

    pub fn with_quality(metadata: T, quality: f32) -> Self {
        Self { metadata, quality }
    }

    pub fn metadata(&self) -> &T {
        &self.metadata
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }
}

pub type MediaTypePreference = Preference<MediaType>;
pub type LanguagePreference = Preference<Language>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quality() {
        let pref = Preference::new(MediaType::all());
        assert_eq!(pref.quality(), 1.0);
        assert_eq!(pref.metadata(), &MediaType::all());
    }

    #[test]
    fn test_with_quality() {
        let pref = Preference::with_quality(Language::new("fr"), 0.3);
        assert_eq!(pref.quality(), 0.3);
        assert_eq!(pref.metadata().main_tag(), "fr");
    }
}
