//! Argument extraction for host calls
//!
//! Calls arrive as JSON arrays; these helpers check arity and pull out typed
//! values with a [`CallError`] naming the call on mismatch.

use serde_json::Value;

use super::CallError;

/// Fail unless exactly `expected` arguments were passed
pub fn expect_count(method: &str, args: &[Value], expected: usize) -> Result<(), CallError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CallError::ArgCount {
            method: method.to_string(),
            expected,
            got: args.len(),
        })
    }
}

/// Integer argument; floats are truncated toward zero
///
/// Floats outside the i64 range are an error rather than a clamped value.
pub fn integer(method: &str, args: &[Value], index: usize) -> Result<i64, CallError> {
    let value = arg(method, args, index)?;
    if let Some(i) = value.as_i64() {
        return Ok(i);
    }
    let f = value
        .as_f64()
        .ok_or_else(|| type_error(method, index, "an integer"))?;
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(CallError::InvalidArg {
            method: method.to_string(),
            message: format!("{} is outside the integer range", f),
        })
    }
}

pub fn float(method: &str, args: &[Value], index: usize) -> Result<f64, CallError> {
    let value = arg(method, args, index)?;
    value
        .as_f64()
        .ok_or_else(|| type_error(method, index, "a number"))
}

pub fn string<'a>(method: &str, args: &'a [Value], index: usize) -> Result<&'a str, CallError> {
    let value = arg(method, args, index)?;
    value
        .as_str()
        .ok_or_else(|| type_error(method, index, "a string"))
}

fn arg<'a>(method: &str, args: &'a [Value], index: usize) -> Result<&'a Value, CallError> {
    args.get(index).ok_or_else(|| CallError::ArgCount {
        method: method.to_string(),
        expected: index + 1,
        got: args.len(),
    })
}

fn type_error(method: &str, index: usize, expected: &'static str) -> CallError {
    CallError::ArgType {
        method: method.to_string(),
        index,
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_accepts_whole_and_fractional_numbers() {
        let args = [json!(42), json!(-7.9), json!(1e30)];
        assert_eq!(integer("setValue", &args, 0), Ok(42));
        assert_eq!(integer("setValue", &args, 1), Ok(-7));
        assert!(matches!(
            integer("setValue", &args, 2),
            Err(CallError::InvalidArg { .. })
        ));
    }

    #[test]
    fn test_type_mismatch_names_the_call() {
        let args = [json!("ten")];
        assert_eq!(
            integer("setSize", &args, 0),
            Err(CallError::ArgType {
                method: "setSize".into(),
                index: 0,
                expected: "an integer",
            })
        );
        assert!(float("setValue", &args, 0).is_err());
        assert_eq!(string("setTitle", &args, 0), Ok("ten"));
    }

    #[test]
    fn test_missing_argument_is_count_error() {
        assert_eq!(
            integer("setValue", &[], 0),
            Err(CallError::ArgCount {
                method: "setValue".into(),
                expected: 1,
                got: 0,
            })
        );
        assert!(expect_count("value", &[json!(1)], 0).is_err());
        assert!(expect_count("value", &[], 0).is_ok());
    }
}
