//! Field definitions used when creating models in tests.

/// Field to insert with a model
#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: String,
    pub relation: Option<String>,
    pub currency_field: Option<String>,
    pub selection: Option<serde_json::Value>,
    pub admin_only: bool,
}

impl FieldSpec {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the raw selection options, stored as-is
    pub fn with_selection(mut self, options: serde_json::Value) -> Self {
        self.selection = Some(options);
        self
    }

    pub fn with_currency_field(mut self, currency_field: impl Into<String>) -> Self {
        self.currency_field = Some(currency_field.into());
        self
    }

    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self
    }
}

/// Creates a field labelled after its name, e.g. `partner_id` becomes `Partner Id`
pub fn field(name: &str, kind: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: label_from_name(name),
        kind: kind.to_string(),
        relation: None,
        currency_field: None,
        selection: None,
        admin_only: false,
    }
}

/// Creates a relationship field pointing at `relation`
pub fn relation(name: &str, kind: &str, relation: &str) -> FieldSpec {
    FieldSpec {
        relation: Some(relation.to_string()),
        ..field(name, kind)
    }
}

fn label_from_name(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
