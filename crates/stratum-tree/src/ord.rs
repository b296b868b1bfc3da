use std::cmp::Ordering;

use serde_json::Value;

/// Total natural ordering over JSON values.
///
/// Values of different kinds order by kind:
/// null < bool < number < string < array < object. Within a kind the
/// ordering is the obvious one (numeric for numbers, lexicographic for
/// strings, elementwise for arrays, keywise over sorted entries for
/// mappings). Used for sort keys and grouping-key tuples.
pub fn value_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            // JSON numbers are never NaN, so partial_cmp is total here.
            let x = x.as_f64().unwrap_or(f64::MAX);
            let y = y.as_f64().unwrap_or(f64::MAX);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (xi, yi) in x.iter().zip(y.iter()) {
                match value_cmp(xi, yi) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Object(x), Value::Object(y)) => {
            // Map iteration is already key-sorted.
            for ((xk, xv), (yk, yv)) in x.iter().zip(y.iter()) {
                match xk.cmp(yk).then_with(|| value_cmp(xv, yv)) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            x.len().cmp(&y.len())
        }
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_order_before_values() {
        assert_eq!(value_cmp(&json!(null), &json!(false)), Ordering::Less);
        assert_eq!(value_cmp(&json!(true), &json!(0)), Ordering::Less);
        assert_eq!(value_cmp(&json!(99), &json!("a")), Ordering::Less);
        assert_eq!(value_cmp(&json!("z"), &json!([])), Ordering::Less);
        assert_eq!(value_cmp(&json!([1]), &json!({})), Ordering::Less);
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(value_cmp(&json!(2), &json!(10)), Ordering::Less);
        assert_eq!(value_cmp(&json!(2.5), &json!(2)), Ordering::Greater);
        assert_eq!(value_cmp(&json!(-1), &json!(1)), Ordering::Less);
        assert_eq!(value_cmp(&json!(3), &json!(3.0)), Ordering::Equal);
    }

    #[test]
    fn arrays_compare_elementwise_then_length() {
        assert_eq!(value_cmp(&json!([1, 2]), &json!([1, 3])), Ordering::Less);
        assert_eq!(value_cmp(&json!([1, 2]), &json!([1, 2, 0])), Ordering::Less);
        assert_eq!(value_cmp(&json!([1, 2]), &json!([1, 2])), Ordering::Equal);
    }

    #[test]
    fn objects_compare_keywise() {
        assert_eq!(
            value_cmp(&json!({"a": 1}), &json!({"a": 2})),
            Ordering::Less
        );
        assert_eq!(
            value_cmp(&json!({"a": 1}), &json!({"b": 1})),
            Ordering::Less
        );
        assert_eq!(
            value_cmp(&json!({"a": 1}), &json!({"a": 1, "b": 2})),
            Ordering::Less
        );
    }
}
