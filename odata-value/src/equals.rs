use crate::value::Value;

/// Check that every value equals the first one.
///
/// Boxes compare by their raw value (`Value::from(&some_box)`), dates by
/// instant and numbers by numeric value. Fewer than two values are always
/// equal.
///
/// ```
/// use odata_value::{NumberBox, Value, equals};
///
/// let n = NumberBox::new(3);
/// assert!(equals([Value::from(&n), Value::from(3)]));
/// assert!(!equals([Value::from(&n), Value::from("3")]));
/// ```
pub fn equals<I>(values: I) -> bool
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    let mut values = values.into_iter().map(Into::into);
    match values.next() {
        Some(first) => values.all(|value| first.strict_eq(&value)),
        None => true,
    }
}
