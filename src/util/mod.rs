use std::sync::atomic::{AtomicUsize, Ordering};

pub mod assets;
pub mod logging;
pub mod persistence;
pub mod version;

static ID_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Unique within the process; the random part keeps ids apart from ones persisted by earlier runs.
pub fn generate_id(prefix: &str) -> String {
    let value = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{value}-{:08x}", rand::random::<u32>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_prefixed_and_distinct() {
        let first = generate_id("toast");
        let second = generate_id("toast");
        assert!(first.starts_with("toast-"));
        assert_ne!(first, second);
    }
}
