/// First-fit allocator over a pool of free block sizes.
///
/// Freed memory comes back as a new block of exactly the released size and
/// is never merged with its neighbours, so the pool only ever fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryManager {
    total_memory: u64,
    free_blocks: Vec<u64>,
}

impl MemoryManager {
    pub fn new(total_memory: u64) -> Self {
        let free_blocks = if total_memory > 0 {
            vec![total_memory]
        } else {
            Vec::new()
        };
        Self {
            total_memory,
            free_blocks,
        }
    }

    /// Carves `requirement` out of the first block large enough to hold it.
    ///
    /// Returns false, leaving the pool untouched, when no single block fits.
    pub fn allocate(&mut self, requirement: u64) -> bool {
        let Some(index) = self
            .free_blocks
            .iter()
            .position(|&block| block >= requirement)
        else {
            return false;
        };

        self.free_blocks[index] -= requirement;
        if self.free_blocks[index] == 0 {
            self.free_blocks.remove(index);
        }
        true
    }

    /// Returns `amount` to the pool as its own block, keeping blocks sorted ascending.
    pub fn deallocate(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        self.free_blocks.push(amount);
        self.free_blocks.sort_unstable();
    }

    pub fn total_memory(&self) -> u64 {
        self.total_memory
    }

    pub fn free_blocks(&self) -> &[u64] {
        &self.free_blocks
    }

    pub fn free_memory(&self) -> u64 {
        self.free_blocks.iter().sum()
    }

    pub fn largest_free_block(&self) -> u64 {
        self.free_blocks.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_fit_splits_and_removes_exhausted_blocks() {
        let mut mm = MemoryManager::new(10);
        assert!(mm.allocate(6));
        assert_eq!(mm.free_blocks(), &[4]);
        assert!(mm.allocate(4));
        assert!(mm.free_blocks().is_empty());
        assert!(!mm.allocate(1));
    }

    #[test]
    fn failed_allocation_leaves_pool_untouched() {
        let mut mm = MemoryManager::new(10);
        assert!(mm.allocate(6));
        assert!(!mm.allocate(5));
        assert_eq!(mm.free_blocks(), &[4]);
        assert_eq!(mm.free_memory(), 4);
    }

    #[test]
    fn released_blocks_are_not_coalesced() {
        let mut mm = MemoryManager::new(10);
        assert!(mm.allocate(6));
        assert!(!mm.allocate(5));
        mm.deallocate(6);
        assert_eq!(mm.free_blocks(), &[4, 6]);
        assert_eq!(mm.largest_free_block(), 6);

        // 5 lands in the 6-block, not in a merged 10
        assert!(mm.allocate(5));
        assert_eq!(mm.free_blocks(), &[4, 1]);
        mm.deallocate(5);
        assert_eq!(mm.free_blocks(), &[1, 4, 5]);
        assert!(!mm.allocate(6));
    }

    #[test]
    fn first_fit_scans_in_storage_order() {
        let mut mm = MemoryManager::new(10);
        assert!(mm.allocate(7));
        mm.deallocate(7);
        // blocks are [3, 7]; a request of 2 takes from the 3-block
        assert!(mm.allocate(2));
        assert_eq!(mm.free_blocks(), &[1, 7]);
    }

    #[test]
    fn empty_pool_rejects_everything() {
        let mut mm = MemoryManager::new(0);
        assert!(!mm.allocate(1));
        assert_eq!(mm.largest_free_block(), 0);
    }
}
