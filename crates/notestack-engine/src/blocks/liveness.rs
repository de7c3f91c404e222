use std::cell::Cell;
use std::rc::Rc;

/// Shared "still mounted" flag.
///
/// A block keeps one and hands clones to every task it spawns. Destroying the
/// block revokes the flag; completions check it before touching block state.
#[derive(Debug, Clone)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn revoke(&self) {
        self.0.set(false);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
