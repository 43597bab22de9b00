//! Expression tree nodes and the clause renderer.
//!
//! A [`Node`] is one of the three logical connectives or one of the five
//! field operators. Connectives hold an ordered list of [`Child`]ren, each
//! either a nested node or a bare `field:value` pair.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use super::operators::{Clause, Near};
use super::range::Range;
use super::value::ScalarValue;

/// A bare `field:value` pair inside a connective.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldPair {
    field: String,
    value: ScalarValue,
}

impl FieldPair {
    /// Pair `value` with `field`.
    pub fn new(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Value matched against the field.
    pub fn value(&self) -> &ScalarValue {
        &self.value
    }
}

impl fmt::Display for FieldPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.value)
    }
}

/// One entry in a connective's child list.
///
/// In documents a pair is `{ field, value }` and a node is a single-key
/// table named after it, e.g. `{ range = { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Child {
    /// Bare pair: foo:'hoge'
    Pair(FieldPair),
    /// Nested connective or operator
    Node(Node),
}

impl Child {
    /// Shorthand for a `field:value` pair.
    pub fn pair(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Child::Pair(FieldPair::new(field, value))
    }

    /// Render as `field:value` or as the node's clause.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

const CHILD_KEYS: &[&str] = &[
    "field", "value", "and", "or", "not", "near", "phrase", "prefix", "term", "range",
];

impl<'de> Deserialize<'de> for Child {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ChildVisitor)
    }
}

struct ChildVisitor;

impl<'de> Visitor<'de> for ChildVisitor {
    type Value = Child;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a field/value pair or a single expression node")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Child, A::Error> {
        let mut field: Option<String> = None;
        let mut value: Option<ScalarValue> = None;

        while let Some(key) = map.next_key::<String>()? {
            // Node payloads deserialize in place so range errors keep their message
            let node = match key.as_str() {
                "field" => {
                    field = Some(map.next_value()?);
                    continue;
                }
                "value" => {
                    value = Some(map.next_value()?);
                    continue;
                }
                "and" => Node::And(map.next_value()?),
                "or" => Node::Or(map.next_value()?),
                "not" => Node::Not(map.next_value()?),
                "near" => Node::Near(map.next_value()?),
                "phrase" => Node::Phrase(map.next_value()?),
                "prefix" => Node::Prefix(map.next_value()?),
                "term" => Node::Term(map.next_value()?),
                "range" => Node::Range(map.next_value()?),
                other => return Err(de::Error::unknown_field(other, CHILD_KEYS)),
            };

            if field.is_some() || value.is_some() || map.next_key::<String>()?.is_some() {
                return Err(de::Error::custom(format!(
                    "`{}` node must be the only key of its entry",
                    key
                )));
            }
            return Ok(Child::Node(node));
        }

        let field = field.ok_or_else(|| de::Error::missing_field("field"))?;
        let value = value.ok_or_else(|| de::Error::missing_field("value"))?;
        Ok(Child::Pair(FieldPair { field, value }))
    }
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Pair(pair) => write!(f, "{}", pair),
            Child::Node(node) => write!(f, "{}", node),
        }
    }
}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    /// All children must match: (and ...)
    And(Vec<Child>),
    /// Any child may match: (or ...)
    Or(Vec<Child>),
    /// Negation: (not ...)
    Not(Vec<Child>),
    /// Terms within a distance: (near field=F distance=D 'a b')
    Near(Near),
    /// Exact phrase: (phrase field=F 'a b')
    Phrase(Clause),
    /// Prefix match: (prefix field=F 'ab')
    Prefix(Clause),
    /// Exact term: (term field=F 'a')
    Term(Clause),
    /// Bounded range: (range field=F [1,2})
    Range(Range),
}

impl Node {
    /// All of `children`.
    pub fn and<I, C>(children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        Node::And(children.into_iter().map(Into::into).collect())
    }

    /// Any of `children`.
    pub fn or<I, C>(children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        Node::Or(children.into_iter().map(Into::into).collect())
    }

    /// None of `children`.
    pub fn not<I, C>(children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        Node::Not(children.into_iter().map(Into::into).collect())
    }

    /// `near` without distance or boost.
    pub fn near(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Node::Near(Near::new(field, value))
    }

    /// `phrase` without boost.
    pub fn phrase(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Node::Phrase(Clause::new(field, value))
    }

    /// `prefix` without boost.
    pub fn prefix(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Node::Prefix(Clause::new(field, value))
    }

    /// `term` without boost.
    pub fn term(field: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Node::Term(Clause::new(field, value))
    }

    /// Keyword heading the clause.
    pub fn name(&self) -> &'static str {
        match self {
            Node::And(_) => "and",
            Node::Or(_) => "or",
            Node::Not(_) => "not",
            Node::Near(_) => "near",
            Node::Phrase(_) => "phrase",
            Node::Prefix(_) => "prefix",
            Node::Term(_) => "term",
            Node::Range(_) => "range",
        }
    }

    /// Render this node as a structured query clause.
    ///
    /// # Examples
    ///
    /// ```
    /// use csquery::{Child, Node};
    ///
    /// let node = Node::and([
    ///     Child::pair("foo", "hoge"),
    ///     Node::or([Child::pair("bar", 123), Node::term("baz", "x").into()]).into(),
    /// ]);
    /// assert_eq!(node.render(), "(and foo:'hoge' (or bar:123 (term field=baz 'x')))");
    /// ```
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::And(children) | Node::Or(children) | Node::Not(children) => {
                write!(f, "({}", self.name())?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
            Node::Near(near) => near.write_to(f),
            Node::Phrase(clause) | Node::Prefix(clause) | Node::Term(clause) => {
                clause.write_to(self.name(), f)
            }
            Node::Range(range) => range.write_to(f),
        }
    }
}

impl From<Near> for Node {
    fn from(near: Near) -> Self {
        Node::Near(near)
    }
}

impl From<Range> for Node {
    fn from(range: Range) -> Self {
        Node::Range(range)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<Near> for Child {
    fn from(near: Near) -> Self {
        Child::Node(Node::Near(near))
    }
}

impl From<Range> for Child {
    fn from(range: Range) -> Self {
        Child::Node(Node::Range(range))
    }
}

impl From<FieldPair> for Child {
    fn from(pair: FieldPair) -> Self {
        Child::Pair(pair)
    }
}

impl<V: Into<ScalarValue>> From<(&str, V)> for Child {
    fn from((field, value): (&str, V)) -> Self {
        Child::pair(field, value)
    }
}

impl<V: Into<ScalarValue>> From<(String, V)> for Child {
    fn from((field, value): (String, V)) -> Self {
        Child::pair(field, value)
    }
}

impl<V: Into<ScalarValue>> From<(&str, V)> for FieldPair {
    fn from((field, value): (&str, V)) -> Self {
        FieldPair::new(field, value)
    }
}
