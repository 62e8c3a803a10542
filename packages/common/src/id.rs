use crc32fast::Hasher;

/// Derive a stable seed from a page id using CRC32.
pub fn page_seed(page_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(page_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for elements within a page.
///
/// The counter only moves forward, so an id is never reused across
/// creation and deletion.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Page seed (CRC32)
    count: u32,   // Sequential counter
}

impl IdGenerator {
    pub fn new(page_id: &str) -> Self {
        Self {
            seed: page_seed(page_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate the next fresh id.
    pub fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Get the page seed.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Fast-forward past ids already present in a loaded tree.
    pub fn resume_after(&mut self, count: u32) {
        self.count = self.count.max(count);
    }
}
