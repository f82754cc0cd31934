use crate::crs::Crs;
use crate::geometry::Geometry;
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Real,
    Text,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Real)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Field {
        Field {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl AttributeValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::Real(r) => Some(*r),
            AttributeValue::Null | AttributeValue::Text(_) => None,
        }
    }
}

/// A geometry with attribute values ordered as the fields of its layer
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    pub attributes: Vec<AttributeValue>,
}

impl Feature {
    pub fn new(geometry: Geometry, attributes: Vec<AttributeValue>) -> Feature {
        Feature {
            geometry: Some(geometry),
            attributes,
        }
    }

    pub fn attribute(&self, index: usize) -> &AttributeValue {
        static NULL: AttributeValue = AttributeValue::Null;
        self.attributes.get(index).unwrap_or(&NULL)
    }
}

/// Input collection of features sharing one crs and one attribute schema
#[derive(Clone, Debug)]
pub struct SourceLayer {
    pub name: String,
    pub crs: Crs,
    pub fields: Vec<Field>,
    pub features: Vec<Feature>,
}

impl SourceLayer {
    pub fn new(name: impl Into<String>, crs: Crs, fields: Vec<Field>) -> SourceLayer {
        SourceLayer {
            name: name.into(),
            crs,
            fields,
            features: vec![],
        }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Index of a field usable as vertex value
    pub fn numeric_field_index(&self, name: &str) -> Result<usize> {
        let index = self.field_index(name).ok_or_else(|| {
            Error::Configuration(format!(
                "Layer '{}' is set to use the value field '{name}', but has no such field",
                self.name
            ))
        })?;

        if !self.fields[index].kind.is_numeric() {
            return Err(Error::Configuration(format!(
                "The value field '{name}' of layer '{}' is not numeric",
                self.name
            )));
        }
        Ok(index)
    }
}
