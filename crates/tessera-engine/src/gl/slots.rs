/// Handle table for GL objects.
///
/// Ids start at 1 so a zeroed handle never names a live object. Freed ids are
/// not reused, which keeps stale handles harmless.
#[derive(Debug)]
pub(crate) struct Slots<T> {
    entries: Vec<Option<T>>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> Slots<T> {
    pub(crate) fn insert(&mut self, value: T) -> u32 {
        self.entries.push(Some(value));
        self.entries.len() as u32
    }

    pub(crate) fn get(&self, id: u32) -> Option<&T> {
        let idx = (id as usize).checked_sub(1)?;
        self.entries.get(idx)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        let idx = (id as usize).checked_sub(1)?;
        self.entries.get_mut(idx)?.as_mut()
    }

    pub(crate) fn remove(&mut self, id: u32) -> Option<T> {
        let idx = (id as usize).checked_sub(1)?;
        self.entries.get_mut(idx)?.take()
    }

    pub(crate) fn live(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_never_reused() {
        let mut s = Slots::default();
        let a = s.insert("a");
        assert_eq!(s.remove(a), Some("a"));
        let b = s.insert("b");
        assert_ne!(a, b);
        assert!(s.get(a).is_none());
        assert_eq!(s.get(b), Some(&"b"));
    }

    #[test]
    fn zero_and_unknown_ids_are_ignored() {
        let mut s: Slots<u8> = Slots::default();
        assert!(s.get(0).is_none());
        assert!(s.get_mut(7).is_none());
        assert!(s.remove(0).is_none());
    }

    #[test]
    fn live_counts_present_entries() {
        let mut s = Slots::default();
        let a = s.insert(1);
        s.insert(2);
        s.remove(a);
        s.remove(a);
        assert_eq!(s.live(), 1);
    }
}
