//! The closed set of `$filter` operators and functions.

use crate::error::FilterError;
use std::fmt;
use std::str::FromStr;

/// How an operator takes its operands and renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// One operand of any form: `(<op> <operand>)`.
    Unary,
    /// A list of exactly two operands: `(<l> <op> <r>)`.
    Binary,
    /// A list of any length; null operands are dropped:
    /// `(<a> <op> <b> <op> ...)`.
    Variadic,
    /// A subject followed by at least one option:
    /// `(<subject> <op> (<o1>, <o2>, ...))`.
    Collection,
    /// A list of arguments: `<name>(<a1>, <a2>, ...)`.
    Function,
}

macro_rules! operators {
    ($( $(#[$meta:meta])* $variant:ident => $name:literal : $shape:ident, )+) => {
        /// A `$filter` operator or function.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operator {
            $( $(#[$meta])* $variant, )+
        }

        impl Operator {
            /// Every operator, in table order.
            pub const ALL: &'static [Operator] = &[$(Operator::$variant),+];

            /// The wire name of the operator.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// How the operator takes its operands.
            pub fn shape(&self) -> Shape {
                match self {
                    $(Self::$variant => Shape::$shape,)+
                }
            }
        }

        impl FromStr for Operator {
            type Err = FilterError;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                match name {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(unknown(name)),
                }
            }
        }
    };
}

operators! {
    // Logical operators
    /// Equal.
    Eq => "eq": Binary,
    /// Not equal.
    Ne => "ne": Binary,
    /// Greater than.
    Gt => "gt": Binary,
    /// Greater than or equal.
    Ge => "ge": Binary,
    /// Less than.
    Lt => "lt": Binary,
    /// Less than or equal.
    Le => "le": Binary,
    /// Logical and.
    And => "and": Variadic,
    /// Logical or.
    Or => "or": Variadic,
    /// Logical negation.
    Not => "not": Unary,
    /// Membership in a list of values.
    In => "in": Collection,
    /// Enumeration flag test.
    Has => "has": Collection,

    // Arithmetic operators
    /// Addition.
    Add => "add": Variadic,
    /// Subtraction.
    Sub => "sub": Variadic,
    /// Arithmetic negation.
    Negate => "-": Unary,
    /// Multiplication.
    Mul => "mul": Variadic,
    /// Division.
    Div => "div": Variadic,
    /// Modulo.
    Mod => "mod": Binary,

    // String and collection functions
    Substringof => "substringof": Function,
    Endswith => "endswith": Function,
    Startswith => "startswith": Function,
    Length => "length": Function,
    Indexof => "indexof": Function,
    Replace => "replace": Function,
    Substring => "substring": Function,
    Concat => "concat": Function,
    Contains => "contains": Function,
    Hassubset => "hassubset": Function,
    Hassubsequence => "hassubsequence": Function,

    // String functions
    MatchesPattern => "matchesPattern": Function,
    Tolower => "tolower": Function,
    Toupper => "toupper": Function,
    Trim => "trim": Function,

    // Date functions
    Date => "date": Function,
    Day => "day": Function,
    Fractionalseconds => "fractionalseconds": Function,
    Hour => "hour": Function,
    Minute => "minute": Function,
    Month => "month": Function,
    Second => "second": Function,
    Time => "time": Function,
    Totaloffsetminutes => "totaloffsetminutes": Function,
    Totalseconds => "totalseconds": Function,
    Year => "year": Function,
    Maxdatetime => "maxdatetime": Function,
    Mindatetime => "mindatetime": Function,
    Now => "now": Function,

    // Math functions
    Round => "round": Function,
    Floor => "floor": Function,
    Ceiling => "ceiling": Function,

    // Type functions
    Cast => "cast": Function,
    Isof => "isof": Function,
}

/// Build the unknown-operator error, suggesting a differently-cased match.
fn unknown(name: &str) -> FilterError {
    let err = FilterError::unknown_operator(name);
    match Operator::ALL
        .iter()
        .find(|op| op.as_str().eq_ignore_ascii_case(name))
    {
        Some(op) => err.with_suggestion(format!("Did you mean `{}`?", op.as_str())),
        None => err,
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
