/// Monotonic ID generator owned by a single tree.
///
/// Nodes are never freed, so unlike a recycling allocator this only counts up.
/// Each tree carries its own generator; two trees built side by side both
/// number their roots 0.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    /// Creates a new ID generator starting from ID 0.
    pub(crate) fn new() -> Self {
        Self { next: 0 }
    }

    /// Hands out the next ID.
    pub(crate) fn get(&mut self) -> u32 {
        let id = self.next;
        self.next = self
            .next
            .checked_add(1)
            .expect("node id space exhausted");
        id
    }
}
