//! Top-level structured query.
//!
//! Wraps a list of expressions in an implicit `and` and renders the final
//! query string. Queries can also be loaded from TOML or JSON documents of
//! the form `{ expressions = [ ... ] }`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::expr::{Child, Node};
use crate::Result;

/// A structured query: every expression must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    expressions: Vec<Child>,
}

impl Query {
    /// Build a query from expressions and `(field, value)` pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use csquery::{Child, Node, Query};
    ///
    /// let query = Query::new([
    ///     Child::pair("foo", "hoge"),
    ///     Child::pair("bar", 123),
    ///     Node::prefix("baz", "ho").into(),
    /// ]);
    /// assert_eq!(query.render(), "(and foo:'hoge' bar:123 (prefix field=baz 'ho'))");
    /// ```
    pub fn new<I, C>(expressions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        Self {
            expressions: expressions.into_iter().map(Into::into).collect(),
        }
    }

    /// Top-level expressions in insertion order.
    pub fn expressions(&self) -> &[Child] {
        &self.expressions
    }

    /// The implicit top-level `and` node.
    pub fn to_node(&self) -> Node {
        Node::And(self.expressions.clone())
    }

    /// Render the query string handed to the search engine.
    pub fn render(&self) -> String {
        let rendered = self.to_string();
        trace!(query = %rendered, "Rendered structured query");
        rendered
    }

    /// Load a query from a TOML document.
    ///
    /// # Errors
    /// Returns error if the document is malformed or holds an invalid range.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load a query from a JSON document.
    ///
    /// # Errors
    /// Returns error if the document is malformed or holds an invalid range.
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(and")?;
        for child in &self.expressions {
            write!(f, " {}", child)?;
        }
        write!(f, ")")
    }
}

impl From<Node> for Query {
    fn from(node: Node) -> Self {
        Self {
            expressions: vec![Child::Node(node)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Near, Range, ScalarValue};
    use crate::testing::CapturedLogs;
    use crate::QueryError;
    use chrono::NaiveDate;

    fn timestamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2013, 1, 23)
            .unwrap()
            .and_hms_opt(12, 34, 56)
            .unwrap()
    }

    #[test]
    fn test_strings_and_timestamps_are_quoted() {
        let query = Query::new([
            Child::pair("foo", "hoge"),
            Child::pair("bar", 123),
            Child::pair("baz", timestamp()),
        ]);
        assert_eq!(query.render(), "(and foo:'hoge' bar:123 baz:'2013-01-23T12:34:56')");
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(Query::default().render(), "(and)");
        assert_eq!(Query::new(Vec::<Child>::new()).render(), "(and)");
    }

    #[test]
    fn test_render_is_idempotent() {
        let query = Query::new([
            Child::pair("foo", "hoge"),
            Node::not([Node::term("bar", 1)]).into(),
        ]);
        let first = query.render();
        assert_eq!(first, query.render());
        assert_eq!(first, query.to_node().render());
    }

    #[test]
    fn test_query_wraps_node() {
        let query = Query::from(Node::or([("a", 1), ("b", 2)]));
        assert_eq!(query.render(), "(and (or a:1 b:2))");
        assert_eq!(query.expressions().len(), 1);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "expressions": [
                {"field": "foo", "value": {"text": "hoge"}},
                {"field": "bar", "value": {"integer": 123}},
                {"or": [
                    {"term": {"field": "genre", "value": {"text": "drama"}, "boost": 2}},
                    {"near": {"field": "title", "value": {"text": "star wars"}, "distance": 3}}
                ]},
                {"range": {"field": "year", "min": {"integer": 1990}, "max_inclusive": true}}
            ]
        }"#;
        let query = Query::from_json_str(json).unwrap();
        assert_eq!(
            query.render(),
            "(and foo:'hoge' bar:123 (or (term field=genre boost=2 'drama') \
             (near field=title distance=3 'star wars')) (range field=year [1990,}))"
        );
    }

    #[test]
    fn test_from_toml() {
        let doc = r#"
            [[expressions]]
            field = "foo"
            value = { text = "hoge" }

            [[expressions]]
            field = "baz"
            value = { timestamp = "2013-01-23T12:34:56" }

            [[expressions]]
            field = "qux"
            value = "absent"

            [[expressions]]
            range = { field = "price", min = { integer = 12 }, max = { integer = 34 }, max_inclusive = true }
        "#;
        let query = Query::from_toml_str(doc).unwrap();
        assert_eq!(
            query.render(),
            "(and foo:'hoge' baz:'2013-01-23T12:34:56' qux: (range field=price [12,34]))"
        );
    }

    #[test]
    fn test_document_with_invalid_range_rejected() {
        let json = r#"{"expressions": [{"range": {"field": "f", "min": {"integer": 34}, "max": {"integer": 12}}}]}"#;
        match Query::from_json_str(json) {
            Err(err @ QueryError::Json(_)) => {
                assert!(err.to_string().contains("min must not exceed max (34, 12)"));
            }
            other => panic!("Expected Json error, got {:?}", other),
        }

        let json = r#"{"expressions": [{"range": {"field": "f"}}]}"#;
        let err = Query::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("cannot set both bounds to absent or empty"));

        let doc = r#"
            [[expressions]]
            range = { field = "f", min = { text = "b" }, max = { text = "a" } }
        "#;
        let err = Query::from_toml_str(doc).unwrap_err();
        assert!(err.to_string().contains("min must not exceed max ('b', 'a')"));
    }

    #[test]
    fn test_render_is_traced() {
        let logs = CapturedLogs::default();
        let query = Query::new([("a", 1)]);
        let rendered = logs.capture(|| query.render());

        let output = logs.contents();
        assert!(output.contains("Rendered structured query"));
        assert!(output.contains(&format!("query={}", rendered)));
    }

    #[test]
    fn test_malformed_documents_rejected() {
        assert!(matches!(Query::from_json_str("{"), Err(QueryError::Json(_))));
        assert!(matches!(
            Query::from_toml_str("expressions = 5"),
            Err(QueryError::Toml(_))
        ));
    }

    #[test]
    fn test_serialized_query_loads_back() {
        let query = Query::new([
            Child::pair("foo", ScalarValue::from("hoge")),
            Child::from(Near::new("title", "a b").with_distance(2).with_boost(1)),
            Child::from(Range::builder("year").max(2000).build().unwrap()),
        ]);
        let json = serde_json::to_string(&query).unwrap();
        let loaded = Query::from_json_str(&json).unwrap();
        assert_eq!(loaded, query);
        assert_eq!(loaded.render(), query.render());
    }
}
