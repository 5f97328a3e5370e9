use crate::ROW_SIZE;

/// A fixed-size, zero-initialized page buffer split into row slots.
pub struct Page {
    data: Box<[u8]>,
}

impl Page {
    pub fn new(page_size: usize) -> Self {
        Self {
            data: vec![0; page_size].into_boxed_slice(),
        }
    }

    /// Row window starting at `offset`, or `None` if it would run past the page.
    pub fn slot(&self, offset: usize) -> Option<&[u8; ROW_SIZE]> {
        self.data.get(offset..)?.first_chunk::<ROW_SIZE>()
    }

    pub fn slot_mut(&mut self, offset: usize) -> Option<&mut [u8; ROW_SIZE]> {
        self.data.get_mut(offset..)?.first_chunk_mut::<ROW_SIZE>()
    }
}
