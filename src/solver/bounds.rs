use std::collections::HashMap;

/// Optional lower and upper bounds per variable slot.
#[derive(Debug, Clone)]
pub struct Bounds<T> {
    lower: HashMap<usize, T>,
    upper: HashMap<usize, T>,
}

impl<T> Bounds<T> {
    pub fn new() -> Self {
        Bounds {
            lower: HashMap::new(),
            upper: HashMap::new(),
        }
    }

    pub fn lower(&self, slot: usize) -> Option<&T> {
        self.lower.get(&slot)
    }

    pub fn upper(&self, slot: usize) -> Option<&T> {
        self.upper.get(&slot)
    }

    pub fn set_lower(&mut self, slot: usize, value: T) {
        self.lower.insert(slot, value);
    }

    pub fn set_upper(&mut self, slot: usize, value: T) {
        self.upper.insert(slot, value);
    }
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Bounds::new()
    }
}
