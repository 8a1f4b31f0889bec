use std::collections::BTreeMap;

/// Coefficients per particle type with a global fallback.
#[derive(Clone, Debug)]
pub struct TypeTable<C: Copy> {
    global: C,
    per_type: BTreeMap<usize, C>,
}
impl<C: Copy> TypeTable<C> {
    pub fn new(global: C) -> Self {
        Self {
            global,
            per_type: BTreeMap::new(),
        }
    }
    pub fn get(&self, type_: usize) -> C {
        *self.per_type.get(&type_).unwrap_or(&self.global)
    }
    pub fn set_global(&mut self, coeff: C) {
        self.global = coeff;
    }
    /// Replace the coefficients of one type
    pub fn set(&mut self, type_: usize, coeff: C) {
        self.per_type.insert(type_, coeff);
    }
}

/// Symmetric table of coefficients per pair of particle types with a global
/// fallback. `get(i, j) == get(j, i)` always holds.
#[derive(Clone, Debug)]
pub struct PairTable<C: Copy> {
    global: C,
    per_pair: BTreeMap<(usize, usize), C>,
}
impl<C: Copy> PairTable<C> {
    pub fn new(global: C) -> Self {
        Self {
            global,
            per_pair: BTreeMap::new(),
        }
    }
    pub fn get(&self, type_i: usize, type_j: usize) -> C {
        *self
            .per_pair
            .get(&Self::key(type_i, type_j))
            .unwrap_or(&self.global)
    }
    pub fn set_global(&mut self, coeff: C) {
        self.global = coeff;
    }
    /// Replace the coefficients of one (unordered) pair of types
    pub fn set(&mut self, type_i: usize, type_j: usize, coeff: C) {
        self.per_pair.insert(Self::key(type_i, type_j), coeff);
    }
    /// All coefficient sets in use, global first
    pub fn all(&self) -> impl Iterator<Item = &C> {
        std::iter::once(&self.global).chain(self.per_pair.values())
    }

    fn key(type_i: usize, type_j: usize) -> (usize, usize) {
        (type_i.min(type_j), type_i.max(type_j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_table_is_symmetric() {
        let mut table = PairTable::new(1.0);
        table.set(2, 1, 5.0);
        assert_eq!(table.get(1, 2), 5.0);
        assert_eq!(table.get(2, 1), 5.0);
        assert_eq!(table.get(1, 1), 1.0);
    }

    #[test]
    fn type_table_falls_back_to_global() {
        let mut table = TypeTable::new(0.5);
        table.set(3, 2.0);
        assert_eq!(table.get(3), 2.0);
        assert_eq!(table.get(1), 0.5);
        table.set_global(0.25);
        assert_eq!(table.get(1), 0.25);
    }
}
