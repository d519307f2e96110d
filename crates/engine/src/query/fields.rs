//! Requested output fields.

/// Normalized set of requested field names.
///
/// Tokens are trimmed and lower-cased, empty tokens are dropped and repeated
/// tokens keep their first position. Dotted tokens such as `expenses.amount`
/// address a field inside a nested collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSpec {
    fields: Vec<String>,
}

impl FieldSpec {
    /// Parses a comma separated field list. Never fails: unknown names are
    /// left for the shaping step to drop.
    pub fn parse(raw: &str) -> Self {
        Self::from_tokens(raw.split(','))
    }

    pub(crate) fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let mut fields: Vec<String> = Vec::new();
        for token in tokens {
            let token = token.trim().to_lowercase();
            if !token.is_empty() && !fields.contains(&token) {
                fields.push(token);
            }
        }
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Requested names in request order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Returns `true` when any requested name contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.fields.iter().any(|f| f.contains(needle))
    }
}
