use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecimalError {
    #[error("Invalid decimal literal: {0:?}")]
    Invalid(String),

    #[error("Decimal value out of range: {0}")]
    OutOfRange(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// Parse a plain decimal literal: optional sign, digits, optional `.` and digits.
///
/// Scale is preserved, so `"2.00"` parses with scale 2. Exponents, underscores,
/// surrounding whitespace and bare `.` forms are rejected.
pub fn parse_decimal(literal: &str) -> Result<Decimal, DecimalError> {
    let (negative, unsigned) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };

    if !is_unsigned_literal(unsigned) {
        return Err(DecimalError::Invalid(literal.to_string()));
    }

    let value = Decimal::from_str_exact(unsigned)
        .map_err(|e| DecimalError::OutOfRange(format!("{}: {}", literal, e)))?;

    Ok(if negative { -value } else { value })
}

fn is_unsigned_literal(s: &str) -> bool {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    match s.split_once('.') {
        Some((int, frac)) => all_digits(int) && all_digits(frac),
        None => all_digits(s),
    }
}

/// Exact product; the scale of the result is the sum of the operand scales.
///
/// `Decimal` silently rounds products that need more than 28 fractional digits
/// or 96 bits of mantissa, so any product it cannot hold exactly is `OutOfRange`.
pub fn mul(a: Decimal, b: Decimal) -> Result<Decimal, DecimalError> {
    let out_of_range = || DecimalError::OutOfRange(format!("{} * {}", a, b));
    let scale = a.scale() + b.scale();
    if scale > Decimal::MAX_SCALE {
        return Err(out_of_range());
    }

    let product = a.checked_mul(b).ok_or_else(out_of_range)?;
    if product.scale() != scale {
        return Err(out_of_range());
    }
    Ok(product)
}

/// `ceil(a * b)` as an integer, computed exactly on the mantissas
///
/// Works for products whose scale exceeds what `Decimal` can represent, e.g.
/// `ceil(1e-28 * 0.2) == 1`.
pub fn ceil_mul(a: Decimal, b: Decimal) -> Result<i64, DecimalError> {
    let out_of_range = || DecimalError::OutOfRange(format!("ceil({} * {})", a, b));

    let mantissa = a.mantissa().checked_mul(b.mantissa()).ok_or_else(out_of_range)?;
    let ceiling = match 10i128.checked_pow(a.scale() + b.scale()) {
        Some(divisor) => {
            let quotient = mantissa / divisor;
            if mantissa % divisor > 0 {
                quotient + 1
            } else {
                quotient
            }
        }
        // The divisor exceeds any i128 mantissa, so the product lies in (-1, 1)
        None => i128::from(mantissa > 0),
    };

    i64::try_from(ceiling).map_err(|_| out_of_range())
}

/// `a - b * floor(a / b)`, so the result carries the sign of `b`.
///
/// Zero exactly when `a` is an integer multiple of `b`.
pub fn floor_mod(a: Decimal, b: Decimal) -> Result<Decimal, DecimalError> {
    if b.is_zero() {
        return Err(DecimalError::DivisionByZero);
    }

    let remainder = a
        .checked_rem(b)
        .ok_or_else(|| DecimalError::OutOfRange(format!("{} mod {}", a, b)))?;

    // checked_rem truncates toward zero; shift into the divisor's sign
    if !remainder.is_zero() && remainder.is_sign_negative() != b.is_sign_negative() {
        Ok(remainder + b)
    } else {
        Ok(remainder)
    }
}

/// Integer part, truncated toward zero.
pub fn int_part(value: Decimal) -> Result<i64, DecimalError> {
    value
        .trunc()
        .to_i64()
        .ok_or_else(|| DecimalError::OutOfRange(value.to_string()))
}
