//! Compiles predicate trees into `$filter` text.
//!
//! ```rust
//! use odata_filter::compile_json;
//! use serde_json::json;
//!
//! let text = compile_json(&json!({ "in": ["Status", 1, 2, 3] })).unwrap();
//! assert_eq!(text.as_deref(), Some("(Status in (1, 2, 3))"));
//! ```

use crate::error::{FilterError, FilterResult};
use crate::operator::{Operator, Shape};
use crate::predicate::Predicate;
use odata_value::BoxedValue;
use odata_value::value::{date_literal, format_number};
use tracing::{debug, trace};

/// Compile a predicate tree.
///
/// Returns `Ok(None)` when the tree is [`Predicate::Undefined`] (or a thunk
/// yielding it). Thunks are invoked on every call.
pub fn compile(predicate: &Predicate) -> FilterResult<Option<String>> {
    let out = render(predicate)?;
    debug!(len = out.as_ref().map_or(0, String::len), "compile()");
    Ok(out)
}

/// Build a predicate from plain JSON and compile it.
pub fn compile_json(json: &serde_json::Value) -> FilterResult<Option<String>> {
    compile(&Predicate::from_json(json)?)
}

fn render(predicate: &Predicate) -> FilterResult<Option<String>> {
    Ok(Some(match predicate {
        Predicate::Undefined => return Ok(None),
        Predicate::Null => "null".to_string(),
        Predicate::Thunk(thunk) => {
            debug!("Invoking predicate thunk");
            return render(&thunk.call());
        }
        Predicate::Text(text) => text.clone(),
        Predicate::Int(n) => n.to_string(),
        Predicate::Float(n) => format_number(*n),
        Predicate::Bool(b) => b.to_string(),
        Predicate::Date(date) => date_literal(date),
        Predicate::Boxed(boxed) => boxed.to_filter(),
        Predicate::List(items) => format!("[{}]", render_all(items)?.join(",")),
        Predicate::Op(operation) => render_operation(operation.operator, &operation.operand)?,
    }))
}

/// Render a list element; nothing renders as an empty string.
fn render_nested(predicate: &Predicate) -> FilterResult<String> {
    Ok(render(predicate)?.unwrap_or_default())
}

fn render_all<'a, I>(items: I) -> FilterResult<Vec<String>>
where
    I: IntoIterator<Item = &'a Predicate>,
{
    items.into_iter().map(render_nested).collect()
}

/// Render an operand of `operator`, which must produce text.
fn render_operand(operator: Operator, predicate: &Predicate) -> FilterResult<String> {
    render(predicate)?.ok_or_else(|| FilterError::missing_operand(operator.as_str()))
}

fn render_operands<'a, I>(operator: Operator, items: I) -> FilterResult<Vec<String>>
where
    I: IntoIterator<Item = &'a Predicate>,
{
    items
        .into_iter()
        .map(|item| render_operand(operator, item))
        .collect()
}

fn operands(operator: Operator, operand: &Predicate) -> FilterResult<&[Predicate]> {
    match operand {
        Predicate::List(items) => Ok(items),
        _ => Err(FilterError::operand_shape(operator.as_str())),
    }
}

fn render_operation(operator: Operator, operand: &Predicate) -> FilterResult<String> {
    let name = operator.as_str();
    let out = match operator.shape() {
        Shape::Unary => format!("({} {})", name, render_operand(operator, operand)?),
        Shape::Binary => {
            let items = operands(operator, operand)?;
            let [left, right] = items else {
                return Err(FilterError::operand_arity(name, "exactly 2", items.len()));
            };
            format!(
                "({} {} {})",
                render_operand(operator, left)?,
                name,
                render_operand(operator, right)?
            )
        }
        Shape::Variadic => {
            let items = operands(operator, operand)?;
            let kept = render_all(items.iter().filter(|p| !p.is_absent()))?;
            format!("({})", kept.join(&format!(" {} ", name)))
        }
        Shape::Collection => {
            let items = operands(operator, operand)?;
            let [subject, options @ ..] = items else {
                return Err(FilterError::operand_arity(name, "at least 2", 0));
            };
            if options.is_empty() {
                return Err(FilterError::operand_arity(name, "at least 2", items.len()));
            }
            format!(
                "({} {} ({}))",
                render_operand(operator, subject)?,
                name,
                render_operands(operator, options)?.join(", ")
            )
        }
        Shape::Function => {
            let items = operands(operator, operand)?;
            format!("{}({})", name, render_operands(operator, items)?.join(", "))
        }
    };
    trace!(operator = name, out = %out, "Compiled operation");
    Ok(out)
}
