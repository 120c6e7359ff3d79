pub mod config;
pub mod exception;
pub mod header;
pub mod language;
pub mod media_type;
pub mod negotiator;
pub mod param;
pub mod preference;
pub mod resource;
pub mod util;
pub mod variant;

pub use config::{Config, VariantEntry};
pub use exception::Exception;
pub use header::PreferenceReader;
pub use language::Language;
pub use media_type::{MediaType, Parameter};
pub use negotiator::{select_best_variant, NegotiationResult};
pub use preference::{LanguagePreference, MediaTypePreference, Preference};
pub use resource::{NegotiatedResponse, Negotiator, Representation, Resource};
pub use util::HtmlBuilder;
pub use variant::Variant;
