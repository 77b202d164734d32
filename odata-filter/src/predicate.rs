//! Declarative predicate trees.

use crate::error::{FilterError, FilterResult};
use crate::operator::Operator;
use chrono::{DateTime, Utc};
use odata_value::{AnyBox, BoolBox, DateBox, LookupBox, NumberBox, ValueBox};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// A zero-argument closure producing a predicate. It is invoked every time
/// the surrounding tree is compiled and its result is never cached.
#[derive(Clone)]
pub struct Thunk(Arc<dyn Fn() -> Predicate + Send + Sync>);

impl Thunk {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Predicate + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Invoke the closure.
    pub fn call(&self) -> Predicate {
        (self.0)()
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk(..)")
    }
}

/// An operator applied to its operand.
#[derive(Debug, Clone)]
pub struct Operation {
    /// The operator.
    pub operator: Operator,
    /// The operand; a [`Predicate::List`] for every shape but unary.
    pub operand: Box<Predicate>,
}

/// A node of a filter predicate tree.
///
/// Scalars render verbatim: text is NOT quoted, so `Text("Name")` is a
/// property reference. Quote literal strings by wrapping them in a box.
///
/// ```rust
/// use odata_filter::{Predicate, compile};
/// use odata_value::ValueBox;
///
/// let p = Predicate::and([
///     Predicate::eq("Name", ValueBox::new("Ada")),
///     Predicate::gt("Age", 30),
/// ]);
/// assert_eq!(
///     compile(&p).unwrap().as_deref(),
///     Some("((Name eq 'Ada') and (Age gt 30))")
/// );
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Predicate {
    /// Nothing; compiles to no output.
    #[default]
    Undefined,
    /// `null`.
    Null,
    /// Verbatim text.
    Text(String),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// `date(<ISO>)`.
    Date(DateTime<Utc>),
    /// Computed on every compile.
    Thunk(Thunk),
    /// A box, rendered with `to_filter`.
    Boxed(AnyBox),
    /// `[a,b,...]`.
    List(Vec<Predicate>),
    /// An operator application.
    Op(Operation),
}

impl Predicate {
    /// Apply an operator to an operand.
    pub fn op(operator: Operator, operand: impl Into<Predicate>) -> Self {
        Self::Op(Operation {
            operator,
            operand: Box::new(operand.into()),
        })
    }

    fn binary(operator: Operator, left: impl Into<Predicate>, right: impl Into<Predicate>) -> Self {
        Self::op(operator, Self::List(vec![left.into(), right.into()]))
    }

    fn variadic<I>(operator: Operator, operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        Self::op(operator, Self::list(operands))
    }

    /// A list of predicates.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// A property reference or any other verbatim text.
    pub fn field(name: impl Into<String>) -> Self {
        Self::Text(name.into())
    }

    /// A predicate computed on every compile.
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> Predicate + Send + Sync + 'static,
    {
        Self::Thunk(Thunk::new(f))
    }

    /// `(left eq right)`.
    pub fn eq(left: impl Into<Predicate>, right: impl Into<Predicate>) -> Self {
        Self::binary(Operator::Eq, left, right)
    }

    /// `(left ne right)`.
    pub fn ne(left: impl Into<Predicate>, right: impl Into<Predicate>) -> Self {
        Self::binary(Operator::Ne, left, right)
    }

    /// `(left gt right)`.
    pub fn gt(left: impl Into<Predicate>, right: impl Into<Predicate>) -> Self {
        Self::binary(Operator::Gt, left, right)
    }

    /// `(left ge right)`.
    pub fn ge(left: impl Into<Predicate>, right: impl Into<Predicate>) -> Self {
        Self::binary(Operator::Ge, left, right)
    }

    /// `(left lt right)`.
    pub fn lt(left: impl Into<Predicate>, right: impl Into<Predicate>) -> Self {
        Self::binary(Operator::Lt, left, right)
    }

    /// `(left le right)`.
    pub fn le(left: impl Into<Predicate>, right: impl Into<Predicate>) -> Self {
        Self::binary(Operator::Le, left, right)
    }

    /// `(left mod right)`.
    pub fn modulo(left: impl Into<Predicate>, right: impl Into<Predicate>) -> Self {
        Self::binary(Operator::Mod, left, right)
    }

    /// `(a and b and ...)`; null operands are skipped when compiling.
    pub fn and<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        Self::variadic(Operator::And, operands)
    }

    /// `(a or b or ...)`; null operands are skipped when compiling.
    pub fn or<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        Self::variadic(Operator::Or, operands)
    }

    /// `(a add b add ...)`.
    pub fn add<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        Self::variadic(Operator::Add, operands)
    }

    /// `(a sub b sub ...)`.
    pub fn sub<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        Self::variadic(Operator::Sub, operands)
    }

    /// `(a mul b mul ...)`.
    pub fn mul<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        Self::variadic(Operator::Mul, operands)
    }

    /// `(a div b div ...)`.
    pub fn div<I>(operands: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        Self::variadic(Operator::Div, operands)
    }

    /// `(not operand)`.
    pub fn not(operand: impl Into<Predicate>) -> Self {
        Self::op(Operator::Not, operand)
    }

    /// `(- operand)`.
    pub fn neg(operand: impl Into<Predicate>) -> Self {
        Self::op(Operator::Negate, operand)
    }

    /// `(subject in (o1, o2, ...))`.
    pub fn in_list<I>(subject: impl Into<Predicate>, options: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        let mut operands = vec![subject.into()];
        operands.extend(options.into_iter().map(Into::into));
        Self::op(Operator::In, Self::List(operands))
    }

    /// `(subject has (flag))`.
    pub fn has(subject: impl Into<Predicate>, flag: impl Into<Predicate>) -> Self {
        Self::binary(Operator::Has, subject, flag)
    }

    /// `name(a1, a2, ...)` for a function operator.
    pub fn call<I>(function: Operator, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Predicate>,
    {
        Self::variadic(function, args)
    }

    /// Check if this is `Null` or `Undefined`.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Build a predicate from plain JSON.
    ///
    /// Arrays become lists and objects become operations: each object must
    /// have exactly one key naming a known operator, whose value is the
    /// operand. Strings, numbers and booleans are verbatim scalars.
    ///
    /// ```rust
    /// use odata_filter::{Predicate, compile};
    /// use serde_json::json;
    ///
    /// let p = Predicate::from_json(&json!({ "eq": ["IDDOCTOR", 3] })).unwrap();
    /// assert_eq!(compile(&p).unwrap().as_deref(), Some("(IDDOCTOR eq 3)"));
    ///
    /// assert!(Predicate::from_json(&json!({ "equals": [1, 2] })).is_err());
    /// ```
    pub fn from_json(json: &serde_json::Value) -> FilterResult<Self> {
        Ok(match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::Text(s.clone()),
            serde_json::Value::Array(items) => {
                Self::List(items.iter().map(Self::from_json).collect::<FilterResult<_>>()?)
            }
            serde_json::Value::Object(map) => {
                let mut entries = map.iter();
                match (entries.next(), entries.next()) {
                    (Some((name, operand)), None) => {
                        let operator: Operator = name.parse()?;
                        Self::op(operator, Self::from_json(operand)?)
                    }
                    _ => return Err(FilterError::malformed_predicate(map.len())),
                }
            }
        })
    }
}

impl TryFrom<serde_json::Value> for Predicate {
    type Error = FilterError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Self::from_json(&json)
    }
}

impl From<&str> for Predicate {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Predicate {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i32> for Predicate {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for Predicate {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Predicate {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Predicate {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<DateTime<Utc>> for Predicate {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Date(v)
    }
}

impl From<AnyBox> for Predicate {
    fn from(v: AnyBox) -> Self {
        Self::Boxed(v)
    }
}

impl From<Thunk> for Predicate {
    fn from(v: Thunk) -> Self {
        Self::Thunk(v)
    }
}

impl From<Operation> for Predicate {
    fn from(v: Operation) -> Self {
        Self::Op(v)
    }
}

macro_rules! impl_from_box {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Predicate {
                fn from(v: $ty) -> Self {
                    Self::Boxed(v.into())
                }
            }
        )+
    };
}

impl_from_box!(ValueBox, BoolBox, DateBox, NumberBox, LookupBox);

impl<T: Into<Predicate>> From<Vec<T>> for Predicate {
    fn from(v: Vec<T>) -> Self {
        Self::list(v)
    }
}

impl<T: Into<Predicate>> From<Option<T>> for Predicate {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}
