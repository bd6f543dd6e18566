use crate::formula::FormulaMap;
use crate::quantity::Quantity;

/// Write a formula map as a Hill system string.
///
/// The Hill system lists C first, then H, then remaining elements
/// alphabetically. Formulae without carbon list all elements
/// alphabetically, hydrogen included. Quantities equal to one are omitted.
pub fn to_hill_formula(map: &FormulaMap) -> String {
    let mut result = String::new();

    if let Some(&carbon) = map.get("C") {
        append_element(&mut result, "C", carbon);
        if let Some(&hydrogen) = map.get("H") {
            append_element(&mut result, "H", hydrogen);
        }
        for (sym, &count) in map.iter().filter(|(sym, _)| *sym != "C" && *sym != "H") {
            append_element(&mut result, sym, count);
        }
    } else {
        for (sym, &count) in map {
            append_element(&mut result, sym, count);
        }
    }

    result
}

fn append_element(buf: &mut String, symbol: &str, count: Quantity) {
    buf.push_str(symbol);
    if !count.is_one() {
        buf.push_str(&count.to_string());
    }
}
