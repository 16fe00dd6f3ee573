//! Anchor identifiers for documentation nodes
//!
//! Each tree build owns one [`AnchorIds`]; it is never shared between builds,
//! so concurrent renders need no synchronisation and may reuse the same ids.

const DEFAULT_PREFIX: &str = "f";
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Monotonic anchor id allocator scoped to a single tree build
#[derive(Debug, Clone)]
pub struct AnchorIds {
    prefix: String,
    next: u64,
}

impl Default for AnchorIds {
    fn default() -> Self {
        Self::new()
    }
}

impl AnchorIds {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    /// Use a custom prefix, e.g. to embed two trees in one HTML page
    ///
    /// The prefix should start with a letter so the id is a valid HTML anchor.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Allocate the next id
    pub fn allocate(&mut self) -> String {
        let id = format!("{}{}", self.prefix, encode_base36(self.next));
        self.next += 1;
        id
    }
}

fn encode_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
