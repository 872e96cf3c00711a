//! Field descriptors - declarative metadata for one reportable column

use serde::{Deserialize, Serialize};

/// Ordered `(stored_value, label)` pairs of a choice field
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoiceSet(Vec<(String, String)>);

impl ChoiceSet {
    pub fn new<K, L, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, l)| (k.into(), l.into()))
                .collect(),
        )
    }

    /// Label for a stored value
    pub fn label_for(&self, stored: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(value, _)| value == stored)
            .map(|(_, label)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, l)| (k.as_str(), l.as_str()))
    }
}

/// Semantic kind of a field, deciding how stored strings are displayed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Plain,
    Date,
    DateTime,
    Boolean,
    Choice { choices: ChoiceSet },
    /// Foreign key to another entity type
    Reference { target: String },
    /// Many-valued relation; never present as a scalar row value
    ManyReference { target: String },
}

impl FieldKind {
    /// Short name for logs and cache keys
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Date => "date",
            Self::DateTime => "date_time",
            Self::Boolean => "boolean",
            Self::Choice { .. } => "choice",
            Self::Reference { .. } => "reference",
            Self::ManyReference { .. } => "many_reference",
        }
    }

    /// Target entity type of a single-valued reference
    pub fn reference_target(&self) -> Option<&str> {
        match self {
            Self::Reference { target } => Some(target),
            _ => None,
        }
    }
}

/// Static description of one column of an entity type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub primary_key: bool,
}

impl FieldDescriptor {
    /// Create a plain field
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: FieldKind::Plain,
            primary_key: false,
        }
    }

    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label).with_kind(FieldKind::Date)
    }

    pub fn date_time(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label).with_kind(FieldKind::DateTime)
    }

    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label).with_kind(FieldKind::Boolean)
    }

    pub fn choice(name: impl Into<String>, label: impl Into<String>, choices: ChoiceSet) -> Self {
        Self::new(name, label).with_kind(FieldKind::Choice { choices })
    }

    pub fn reference(
        name: impl Into<String>,
        label: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::new(name, label).with_kind(FieldKind::Reference {
            target: target.into(),
        })
    }

    pub fn many(name: impl Into<String>, label: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(name, label).with_kind(FieldKind::ManyReference {
            target: target.into(),
        })
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark as the primary key column
    pub fn as_primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Whether this field can appear in reconstructed history at all
    #[inline]
    pub fn is_reportable(&self) -> bool {
        !self.primary_key && !matches!(self.kind, FieldKind::ManyReference { .. })
    }
}
