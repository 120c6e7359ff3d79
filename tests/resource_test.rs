use bytes::Bytes;
use conneg::{
    Config, Language, MediaType, Negotiator, Representation, Resource, Variant, VariantEntry,
};
use mockall::{mock, predicate::eq};

mock! {
    pub Document {}

    impl Resource for Document {
        fn variants(&self) -> Vec<Variant>;
        fn representation(&self, variant: &Variant) -> Option<Representation>;
    }
}

/// 一个按语言提供固定文本的资源
struct Greeting;

impl Resource for Greeting {
    fn variants(&self) -> Vec<Variant> {
        ["en", "fr", "de"]
            .iter()
            .map(|tag| Variant::with_language(MediaType::new("text", "plain"), Language::new(*tag)))
            .collect()
    }

    fn representation(&self, variant: &Variant) -> Option<Representation> {
        let text = match variant.language()?.main_tag() {
            "en" => "hello",
            "fr" => "bonjour",
            "de" => "hallo",
            _ => return None,
        };
        Some(Representation::new(variant.clone(), text))
    }
}

#[cfg(test)]
mod resource_tests {
    use super::*;

    #[test]
    fn test_greeting_by_language() {
        let negotiator = Negotiator::default();
        let response = negotiator
            .respond(&Greeting, Some("text/*"), Some("de, en;q=0.5"), 0)
            .unwrap();
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.content(), &Bytes::from("hallo"));
        assert_eq!(response.content_type(), "text/plain");
    }

    #[test]
    fn test_greeting_without_headers_picks_first() {
        let response = Negotiator::default().respond(&Greeting, None, None, 1).unwrap();
        assert_eq!(response.content(), &Bytes::from("hello"));
    }

    #[test]
    fn test_greeting_not_acceptable() {
        let response = Negotiator::default()
            .respond(&Greeting, Some("application/json"), None, 2)
            .unwrap();
        assert_eq!(response.status_code(), 406);
        assert!(response.content_type().starts_with("text/html"));
        let body = String::from_utf8_lossy(response.content());
        for tag in ["en", "fr", "de"] {
            assert!(body.contains(&format!("<td>{}</td>", tag)));
        }
    }

    #[test]
    fn test_mocked_document() {
        let json = Variant::new(MediaType::new("application", "json"));
        let xml = Variant::new(MediaType::new("application", "xml"));

        let mut document = MockDocument::new();
        document
            .expect_variants()
            .times(1)
            .return_const(vec![xml.clone(), json.clone()]);
        document
            .expect_representation()
            .with(eq(json.clone()))
            .times(1)
            .returning(|v| Some(Representation::new(v.clone(), Bytes::from_static(b"{}"))));

        let response = Negotiator::default()
            .respond(&document, Some("application/json, application/*;q=0.2"), None, 3)
            .unwrap();
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.variant(), Some(&json));
        assert_eq!(response.content(), &Bytes::from_static(b"{}"));
    }

    #[test]
    fn test_negotiator_uses_explicit_config() {
        let config = Config::new()
            .with_ignore_invalid_preferences(true)
            .with_variant(VariantEntry::from_file("page.html.fr"));
        let negotiator = Negotiator::new(config);
        assert!(negotiator.config().ignore_invalid_preferences());

        let response = negotiator
            .respond(&Greeting, Some("text/plain;q=9, text/*"), Some("fr"), 4)
            .unwrap();
        assert_eq!(response.content(), &Bytes::from("bonjour"));
    }
}
