// utils/numeric.rs
//! Lenient query-string numbers: the longest numeric prefix is read and
//! any trailing text is ignored, so `"1000abc"` is 1000 and `"5km"` is 5.

/// Integer prefix with an optional sign. `None` when no digit leads.
pub fn leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let sign_len = sign_len(value);
    let digits = count_digits(&value[sign_len..]);
    if digits == 0 {
        return None;
    }
    value[..sign_len + digits].parse().ok()
}

/// `i32` variant of [`leading_int`]. Values outside `i32` are dropped.
pub fn leading_i32(value: &str) -> Option<i32> {
    leading_int(value).and_then(|v| i32::try_from(v).ok())
}

/// Decimal prefix with optional sign, fraction and exponent. Only finite
/// values are returned.
pub fn leading_float(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let bytes = value.as_bytes();

    let mut end = sign_len(value);
    let int_digits = count_digits(&value[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&value[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let exp_sign = sign_len(&value[end + 1..]);
        let exp_digits = count_digits(&value[end + 1 + exp_sign..]);
        if exp_digits > 0 {
            end += 1 + exp_sign + exp_digits;
        }
    }

    value[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

fn sign_len(value: &str) -> usize {
    usize::from(value.starts_with('+') || value.starts_with('-'))
}

fn count_digits(value: &str) -> usize {
    value.bytes().take_while(u8::is_ascii_digit).count()
}
