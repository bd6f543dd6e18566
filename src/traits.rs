use crate::quantity::Quantity;

/// Read and write access to element counts, keyed by element symbol.
pub trait Composition {
    type Iter<'a>: Iterator<Item = (&'a str, Quantity)>
    where
        Self: 'a;

    /// Quantity of `symbol`, zero if absent.
    fn get(&self, symbol: &str) -> Quantity;

    /// Set the quantity of `symbol`, returning the previous one. A quantity
    /// that is not finite and positive removes the element instead.
    fn set(&mut self, symbol: &str, quantity: Quantity) -> Option<Quantity>;

    fn remove(&mut self, symbol: &str) -> Option<Quantity>;

    fn contains(&self, symbol: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element symbols and their quantities in lexicographic symbol order.
    fn iter(&self) -> Self::Iter<'_>;
}
