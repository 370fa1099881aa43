use crate::Integrable;

/// States saved after every step.
#[derive(Debug)]
pub struct MemoryResult<State>
where
    State: Integrable,
{
    pub t: Vec<f64>,
    pub y: Vec<State>,
}

impl<State: Integrable> MemoryResult<State> {
    pub fn new(n: usize) -> Self {
        Self {
            t: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        }
    }

    pub fn insert(&mut self, t: f64, x: &State) {
        self.t.push(t);
        self.y.push(x.clone());
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}
