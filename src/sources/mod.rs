pub mod layer;

pub use self::layer::{AttributeValue, Feature, Field, FieldKind, SourceLayer};

use std::collections::HashMap;

/// Resolves the source identifiers of the input records to layers
pub trait LayerProvider {
    fn layer(&self, source: &str) -> Option<&SourceLayer>;
}

impl LayerProvider for HashMap<String, SourceLayer> {
    fn layer(&self, source: &str) -> Option<&SourceLayer> {
        self.get(source)
    }
}

impl LayerProvider for [SourceLayer] {
    fn layer(&self, source: &str) -> Option<&SourceLayer> {
        self.iter().find(|l| l.name == source)
    }
}

impl LayerProvider for Vec<SourceLayer> {
    fn layer(&self, source: &str) -> Option<&SourceLayer> {
        self.as_slice().layer(source)
    }
}
