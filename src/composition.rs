use std::collections::btree_map;
use std::fmt;
use std::str::FromStr;

use crate::formula::{parse_formula, to_hill_formula, FormulaError, FormulaMap};
use crate::quantity::Quantity;
use crate::traits::Composition;

/// A chemical formula held as element counts.
///
/// Displays as its Hill formula. Two formulae are equal when they hold the
/// same elements with the same quantities, however they were written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Formula {
    data: FormulaMap,
}

impl Formula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self, FormulaError> {
        Ok(Self {
            data: parse_formula(text)?,
        })
    }

    /// The formula in Hill order.
    pub fn formula(&self) -> String {
        to_hill_formula(&self.data)
    }

    /// Replace the contents with those parsed from `text`. On error the
    /// formula is left unchanged.
    pub fn set_formula(&mut self, text: &str) -> Result<(), FormulaError> {
        self.data = parse_formula(text)?;
        Ok(())
    }

    pub fn as_map(&self) -> &FormulaMap {
        &self.data
    }

    pub fn to_map(&self) -> FormulaMap {
        self.data.clone()
    }

    pub fn into_map(self) -> FormulaMap {
        self.data
    }
}

impl Composition for Formula {
    type Iter<'a> = Elements<'a>;

    fn get(&self, symbol: &str) -> Quantity {
        self.data.get(symbol).copied().unwrap_or(Quantity::ZERO)
    }

    fn set(&mut self, symbol: &str, quantity: Quantity) -> Option<Quantity> {
        if !quantity.is_positive() {
            self.data.remove(symbol)
        } else {
            self.data.insert(symbol.to_string(), quantity)
        }
    }

    fn remove(&mut self, symbol: &str) -> Option<Quantity> {
        self.data.remove(symbol)
    }

    fn contains(&self, symbol: &str) -> bool {
        self.data.contains_key(symbol)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn iter(&self) -> Elements<'_> {
        Elements {
            inner: self.data.iter(),
        }
    }
}

/// Iterator over the elements of a [`Formula`].
pub struct Elements<'a> {
    inner: btree_map::Iter<'a, String, Quantity>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = (&'a str, Quantity);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(sym, &q)| (sym.as_str(), q))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Formula {
    type Item = (&'a str, Quantity);
    type IntoIter = Elements<'a>;

    fn into_iter(self) -> Elements<'a> {
        Composition::iter(self)
    }
}

/// Entries that are not finite and positive are dropped.
impl From<FormulaMap> for Formula {
    fn from(mut data: FormulaMap) -> Self {
        data.retain(|_, q| q.is_positive());
        Self { data }
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let f: Formula = "H4C".parse().unwrap();
        assert_eq!(f.formula(), "CH4");
        assert_eq!(f.to_string(), "CH4");
    }

    #[test]
    fn missing_element_is_zero() {
        let f = Formula::parse("H2O").unwrap();
        assert_eq!(f.get("O"), Quantity::ONE);
        assert_eq!(f.get("N"), Quantity::ZERO);
        assert!(!f.contains("N"));
    }

    #[test]
    fn set_and_remove() {
        let mut f = Formula::parse("H2O").unwrap();
        assert_eq!(f.set("C", Quantity::Integer(2)), None);
        assert_eq!(f.set("H", Quantity::Integer(6)), Some(Quantity::Integer(2)));
        assert_eq!(f.formula(), "C2H6O");

        assert_eq!(f.remove("O"), Some(Quantity::ONE));
        assert_eq!(f.remove("O"), None);
        assert_eq!(f.formula(), "C2H6");
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn setting_zero_removes() {
        let mut f = Formula::parse("CH4").unwrap();
        assert_eq!(f.set("H", Quantity::ZERO), Some(Quantity::Integer(4)));
        assert!(!f.contains("H"));
        assert_eq!(f.set("N", Quantity::ZERO), None);
        assert_eq!(f.formula(), "C");
    }

    #[test]
    fn setting_non_positive_removes() {
        let mut f = Formula::parse("CH4O").unwrap();
        assert_eq!(f.set("H", Quantity::Decimal(-2.0)), Some(Quantity::Integer(4)));
        assert_eq!(f.set("O", Quantity::Decimal(f64::NAN)), Some(Quantity::ONE));
        assert_eq!(f.set("N", Quantity::Decimal(f64::INFINITY)), None);
        assert_eq!(f.formula(), "C");
        assert_eq!(Formula::parse(&f.formula()).unwrap(), f);
    }

    #[test]
    fn from_map_drops_non_positive() {
        let map = FormulaMap::from([
            ("H".to_string(), Quantity::Integer(2)),
            ("O".to_string(), Quantity::ONE),
            ("N".to_string(), Quantity::ZERO),
            ("S".to_string(), Quantity::Decimal(-1.5)),
            ("P".to_string(), Quantity::Decimal(f64::NAN)),
        ]);
        let f = Formula::from(map);
        assert_eq!(f.formula(), "H2O");
        assert_eq!(f.len(), 2);
        assert!(!f.contains("N"));
    }

    #[test]
    fn set_formula_replaces_contents() {
        let mut f = Formula::parse("NaCl").unwrap();
        f.set_formula("(H2SO4)4").unwrap();
        assert_eq!(f.formula(), "H8O16S4");
        assert!(!f.contains("Na"));
    }

    #[test]
    fn failed_set_formula_keeps_contents() {
        let mut f = Formula::parse("NaCl").unwrap();
        assert!(f.set_formula("Na(Cl").is_err());
        assert_eq!(f.formula(), "ClNa");
    }

    #[test]
    fn iteration_is_sorted() {
        let f = Formula::parse("OHC").unwrap();
        let symbols: Vec<&str> = f.iter().map(|(sym, _)| sym).collect();
        assert_eq!(symbols, ["C", "H", "O"]);

        let mut total = 0;
        for (_, q) in &f {
            total += q.as_f64() as u64;
        }
        assert_eq!(total, 3);
    }

    #[test]
    fn equality_ignores_spelling() {
        let a = Formula::parse("CH3CH2OH").unwrap();
        let b = Formula::parse("C2H6O").unwrap();
        let c = Formula::parse("C2H6O2").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn empty_formula() {
        let f = Formula::new();
        assert!(f.is_empty());
        assert_eq!(f.formula(), "");
        assert_eq!(f.iter().count(), 0);
    }

    #[test]
    fn map_round_trip() {
        let f = Formula::parse("Fe2.5O").unwrap();
        let map = f.to_map();
        assert_eq!(map["Fe"], Quantity::Decimal(2.5));
        assert_eq!(Formula::from(map), f);
        assert_eq!(f.into_map().len(), 2);
    }
}
