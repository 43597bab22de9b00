//! Expression module - values, operators, ranges and logical connectives.
//!
//! Every type here is an immutable value. Trees are built bottom-up and
//! rendered with `Display` (or `render()`), e.g. `(near field=foo distance=2 'hoge')`.

pub mod node;
pub mod operators;
pub mod range;
pub mod value;

pub use node::{Child, FieldPair, Node};
pub use operators::{Clause, Near};
pub use range::{Range, RangeBuilder};
pub use value::{format_value, FormattedValue, ScalarValue};
