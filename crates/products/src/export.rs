//! CSV export of a catalog collection.
//!
//! Pure function of the collection; writing the payload somewhere (file,
//! download) is the caller's job.

use crate::product::Product;

pub const CSV_HEADER: &str = "name,price,stock,category,badge";

/// Text fields are always quoted (inner quotes doubled); numbers are bare,
/// with prices written the way JavaScript prints numbers (`1e+21`, `0.5`).
/// Rows are joined with `\n`, without a trailing newline.
pub fn to_csv(products: &[Product]) -> String {
    let mut lines = Vec::with_capacity(products.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(products.iter().map(row));
    lines.join("\n")
}

fn row(product: &Product) -> String {
    format!(
        "{},{},{},{},{}",
        quote(product.name()),
        js_number(product.price()),
        product.stock(),
        quote(product.category()),
        quote(product.badge()),
    )
}

/// Plain decimal for magnitudes in `[1e-6, 1e21)`, exponent form otherwise
/// with an explicit sign on positive exponents.
fn js_number(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted,
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
