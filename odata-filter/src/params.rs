//! Query parameters handed to the transport.

use crate::compiler::compile;
use crate::error::FilterResult;
use crate::predicate::Predicate;
use indexmap::IndexMap;
use tracing::debug;

/// Name of the filter parameter.
pub const FILTER: &str = "$filter";
/// Name of the expand parameter.
pub const EXPAND: &str = "$expand";

/// A `$filter` value: ready text or a predicate tree still to compile.
#[derive(Debug, Clone)]
pub enum FilterParam {
    /// Already compiled text.
    Text(String),
    /// A predicate tree.
    Tree(Predicate),
}

impl From<&str> for FilterParam {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FilterParam {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Predicate> for FilterParam {
    fn from(tree: Predicate) -> Self {
        Self::Tree(tree)
    }
}

/// Query parameters of a GET request.
///
/// ```rust
/// use odata_filter::{Predicate, QueryParams};
///
/// let params = QueryParams::new()
///     .filter(Predicate::eq("Id", 7))
///     .param("$top", "10")
///     .apply_filter()
///     .unwrap();
///
/// assert_eq!(
///     params.pairs().unwrap(),
///     vec![
///         ("$filter".to_string(), "(Id eq 7)".to_string()),
///         ("$top".to_string(), "10".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// The `$filter` parameter.
    pub filter: Option<FilterParam>,
    /// The `$expand` parameter.
    pub expand: Option<String>,
    /// Any other parameter, in insertion order.
    pub extra: IndexMap<String, String>,
}

impl QueryParams {
    /// Create empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `$filter` parameter.
    pub fn filter(mut self, filter: impl Into<FilterParam>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set the `$expand` parameter.
    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Set any other parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Compile a tree `$filter` to text and clear an empty one.
    pub fn apply_filter(mut self) -> FilterResult<Self> {
        self.filter = match self.filter.take() {
            Some(FilterParam::Tree(tree)) => compile(&tree)?
                .filter(|text| !text.is_empty())
                .map(FilterParam::Text),
            Some(FilterParam::Text(text)) if text.is_empty() => None,
            other => other,
        };
        debug!(has_filter = self.filter.is_some(), "QueryParams::apply_filter()");
        Ok(self)
    }

    /// The non-empty parameters as `(name, value)` pairs: `$filter` first,
    /// then `$expand`, then the rest in insertion order. Tree filters are
    /// compiled.
    pub fn pairs(&self) -> FilterResult<Vec<(String, String)>> {
        let filter = match &self.filter {
            Some(FilterParam::Tree(tree)) => compile(tree)?,
            Some(FilterParam::Text(text)) => Some(text.clone()),
            None => None,
        };

        let mut out = Vec::with_capacity(self.extra.len() + 2);
        if let Some(filter) = filter {
            out.push((FILTER.to_string(), filter));
        }
        if let Some(expand) = &self.expand {
            out.push((EXPAND.to_string(), expand.clone()));
        }
        out.extend(
            self.extra
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        out.retain(|(_, value)| !value.is_empty());
        Ok(out)
    }
}
