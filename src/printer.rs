//! Rendering a `Factor` as a plain text table.
//!
//! The first column lists the scope values of each assignment, comma-joined, under a header of
//! the comma-joined scope names. The second column, `Value`, holds the table value. Rows follow
//! the `Factor`'s canonical order.
//!
//! ```text
//! S, R          Value
//! ------------  -----
//! true, true    0.009
//! true, false   0.001
//! false, true   0.099
//! false, false  0.891
//! ```

use crate::config::Config;
use crate::factor::Factor;

use itertools::Itertools;


/// Render `factor` with the default `Config`
pub fn render(factor: &Factor) -> String {
    render_with(factor, &Config::default())
}

/// Render `factor` using the number format settings of `config`
pub fn render_with(factor: &Factor, config: &Config) -> String {
    let header = factor.scope().iter().join(", ");
    let rows: Vec<(String, String)> = factor.entries()
        .map(|(assignment, v)| {
            (
                assignment.iter().map(|(_, value)| value).join(", "),
                format_general(v, config.significant_digits())
            )
        })
        .collect();

    let width = |s: &String| s.chars().count();
    let left = rows.iter().map(|r| width(&r.0)).chain(Some(width(&header))).max().unwrap_or(0);
    let right = rows.iter().map(|r| width(&r.1)).chain(Some("Value".len())).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("{:<left$}  {:>right$}", header, "Value", left = left, right = right));
    lines.push(format!("{}  {}", "-".repeat(left), "-".repeat(right)));
    for (values, v) in rows.iter() {
        lines.push(format!("{:<left$}  {:>right$}", values, v, left = left, right = right));
    }

    lines.join("\n")
}

/// Print `factor` to stdout
pub fn print_table(factor: &Factor) {
    println!("{}", render(factor));
}


/// Format a number with `digits` significant digits, in plain decimal notation for magnitudes
/// in `[1e-4, 10^digits)` and in scientific notation otherwise. Trailing zeros are dropped.
///
/// ```
/// use tally::printer::format_general;
///
/// assert_eq!(format_general(0.891, 6), "0.891");
/// assert_eq!(format_general(0.000012345678, 6), "1.23457e-05");
/// assert_eq!(format_general(1234567.0, 6), "1.23457e+06");
/// ```
pub fn format_general(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return String::from("nan");
    } else if value.is_infinite() {
        return String::from(if value > 0.0 { "inf" } else { "-inf" });
    } else if value == 0.0 {
        return String::from("0");
    }

    let digits = digits.max(1);

    // the exponent after rounding to `digits` significant digits
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exp) = match sci.find('e') {
        Some(i) => (&sci[..i], sci[i + 1..].parse::<i32>().unwrap_or(0)),
        None => return sci
    };

    if exp < -4 || exp >= digits as i32 {
        format!("{}e{}{:02}", trim_zeros(mantissa), if exp < 0 { '-' } else { '+' }, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value))
    }
}

fn trim_zeros(s: &str) -> String {
    if s.contains('.') {
        String::from(s.trim_end_matches('0').trim_end_matches('.'))
    } else {
        String::from(s)
    }
}
