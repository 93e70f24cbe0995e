use std::collections::HashSet;

/// Checked row ids, kept in the order they were first selected.
///
/// Independent of paging: ids stay selected while the user moves between
/// pages, until removed or cleared.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &str) {
        if self.members.contains(id) {
            self.remove(id);
        } else {
            self.insert(id);
        }
    }

    pub fn select_many<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.insert(id.as_ref());
        }
    }

    pub fn deselect_many<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.remove(id.as_ref());
        }
    }

    /// Replaces the selection outright.
    pub fn set_many<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clear();
        self.select_many(ids);
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// True when `ids` is non-empty and every one of them is selected.
    pub fn contains_all(&self, ids: &[String]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.contains(id))
    }

    fn insert(&mut self, id: &str) {
        if self.members.insert(id.to_string()) {
            self.order.push(id.to_string());
        }
    }

    fn remove(&mut self, id: &str) {
        if self.members.remove(id) {
            self.order.retain(|existing| existing != id);
        }
    }
}
