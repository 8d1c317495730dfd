use std::sync::OnceLock;

use crate::model::PropDescriptor;

/// Write-once cache of the hierarchy root's property set.
///
/// The first lookup loads and stores the set; every later lookup returns the
/// same slice. There is no invalidation.
#[derive(Debug, Default)]
pub struct RootPropsCache {
    cell: OnceLock<Vec<PropDescriptor>>,
}

impl RootPropsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, load: impl FnOnce() -> Vec<PropDescriptor>) -> &[PropDescriptor] {
        self.cell.get_or_init(load)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_loads_once() {
        let cache = RootPropsCache::new();
        let loads = Cell::new(0);
        let load = || {
            loads.set(loads.get() + 1);
            vec![PropDescriptor::own("id", "string", false).inherit_from("BaseProps")]
        };

        assert!(!cache.is_loaded());
        let first = cache.get_or_load(load).to_vec();
        let second = cache.get_or_load(|| {
            loads.set(loads.get() + 1);
            Vec::new()
        });

        assert_eq!(first, second);
        assert_eq!(loads.get(), 1);
        assert!(cache.is_loaded());
    }
}
