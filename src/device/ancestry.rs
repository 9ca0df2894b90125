//! Lazy walk up the device tree.
//!
//! Each call to [`ancestors`] starts an independent walk. A parent is only
//! looked up when the iterator is advanced, so searches that stop at the first
//! match never touch the rest of the chain.

use super::DeviceRegistry;
use std::iter::FusedIterator;

/// Iterator over the ancestors of a device, nearest first
pub struct Ancestors<'r, R: DeviceRegistry> {
    registry: &'r R,
    cursor: Option<R::Node>,
}

/// Start a walk from `device`; the device itself is not yielded
pub fn ancestors<'r, R: DeviceRegistry>(registry: &'r R, device: &R::Node) -> Ancestors<'r, R> {
    Ancestors {
        registry,
        cursor: Some(device.clone()),
    }
}

impl<'r, R: DeviceRegistry> Iterator for Ancestors<'r, R> {
    type Item = R::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.take()?;
        let parent = self.registry.parent_of(&current)?;
        self.cursor = Some(parent.clone());
        Some(parent)
    }
}

impl<'r, R: DeviceRegistry> FusedIterator for Ancestors<'r, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceNode, MemoryRegistry};

    fn sysnames<R: DeviceRegistry>(walk: Ancestors<'_, R>) -> Vec<String> {
        walk.map(|node| node.sysname().to_string()).collect()
    }

    #[test]
    fn test_walk_is_nearest_first() {
        let mut registry = MemoryRegistry::new();
        let usb = registry.add("1-1", "usb", Some("usb"), None);
        let hid = registry.add("0003:046D:C21D.0001", "hid", Some("hid-generic"), Some(usb));
        let input = registry.add("input7", "input", None, Some(hid));
        let js = registry.add("js0", "input", None, Some(input));

        let node = registry.node(js);
        assert_eq!(
            sysnames(ancestors(&registry, &node)),
            vec!["input7", "0003:046D:C21D.0001", "1-1"]
        );
    }

    #[test]
    fn test_orphan_yields_nothing() {
        let mut registry = MemoryRegistry::new();
        let js = registry.add("js3", "input", None, None);

        let mut walk = ancestors(&registry, &registry.node(js));
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
    }

    #[test]
    fn test_walks_are_independent() {
        let mut registry = MemoryRegistry::new();
        let root = registry.add("root", "platform", None, None);
        let js = registry.add("js0", "input", None, Some(root));
        let node = registry.node(js);

        let mut first = ancestors(&registry, &node);
        assert_eq!(first.next().map(|n| n.sysname().to_string()), Some("root".into()));
        assert!(first.next().is_none());

        let second = ancestors(&registry, &node);
        assert_eq!(sysnames(second), vec!["root"]);
    }

    #[test]
    fn test_walk_is_lazy() {
        let mut registry = MemoryRegistry::new();
        let top = registry.add("top", "usb", None, None);
        let mid = registry.add("mid", "hid", Some("hid-generic"), Some(top));
        let js = registry.add("js0", "input", None, Some(mid));

        let found = ancestors(&registry, &registry.node(js)).find(|n| n.is_bound_to("hid-generic"));
        assert_eq!(found.map(|n| n.sysname().to_string()), Some("mid".into()));
        assert_eq!(registry.parent_lookups(), 1);
    }
}
