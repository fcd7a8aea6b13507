//! Double buffer with an explicit front index.
//!
//! A stage reads the front slot and writes the back slot through
//! [`PingPong::split`], then calls [`PingPong::flip`] so the freshly
//! written slot becomes the front. The borrow checker guarantees that the
//! two halves of a split never alias.

/// Two equally-shaped slots, one of which is the readable front.
#[derive(Clone, Debug, PartialEq)]
pub struct PingPong<T> {
    slots: [T; 2],
    front: usize,
}

impl<T> PingPong<T> {
    /// A pair with `front` readable and `back` as the write target.
    pub fn new(front: T, back: T) -> Self {
        Self {
            slots: [front, back],
            front: 0,
        }
    }

    /// A pair whose slots are both built by `make`.
    pub fn from_fn(mut make: impl FnMut() -> T) -> Self {
        Self::new(make(), make())
    }

    /// The readable slot.
    pub fn front(&self) -> &T {
        &self.slots[self.front]
    }

    /// Mutable access to the readable slot.
    pub fn front_mut(&mut self) -> &mut T {
        &mut self.slots[self.front]
    }

    /// The write-target slot.
    pub fn back(&self) -> &T {
        &self.slots[1 - self.front]
    }

    /// Mutable access to the write-target slot.
    pub fn back_mut(&mut self) -> &mut T {
        &mut self.slots[1 - self.front]
    }

    /// Borrow the front for reading and the back for writing at once.
    pub fn split(&mut self) -> (&T, &mut T) {
        let (a, b) = self.slots.split_at_mut(1);
        if self.front == 0 {
            (&a[0], &mut b[0])
        } else {
            (&b[0], &mut a[0])
        }
    }

    /// Both slots mutably, front first.
    pub fn both_mut(&mut self) -> (&mut T, &mut T) {
        let (a, b) = self.slots.split_at_mut(1);
        if self.front == 0 {
            (&mut a[0], &mut b[0])
        } else {
            (&mut b[0], &mut a[0])
        }
    }

    /// Swap roles: the back slot becomes the front.
    pub fn flip(&mut self) {
        self.front = 1 - self.front;
    }

    /// Index (0 or 1) of the slot currently serving as the front.
    pub fn front_index(&self) -> usize {
        self.front
    }

    /// Apply `f` to both slots.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut T)) {
        for slot in &mut self.slots {
            f(slot);
        }
    }
}
