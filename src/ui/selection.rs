//! Ring-list selection over the containers enumerated at startup.

use crate::error::ViewerError;
use crate::runtime::Container;

#[derive(Debug, Clone)]
pub struct SelectionModel {
    containers: Vec<Container>,
    current: usize,
}

impl SelectionModel {
    /// Start with the first container selected. An empty list is allowed but
    /// nothing can be selected from it.
    pub fn new(containers: Vec<Container>) -> Self {
        Self {
            containers,
            current: 0,
        }
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Container> {
        self.containers.get(self.current)
    }

    /// Move to the next container, wrapping from the last to the first.
    pub fn next(&mut self) -> Result<&Container, ViewerError> {
        let len = self.containers.len();
        if len == 0 {
            return Err(ViewerError::EmptyCollection);
        }
        self.current = (self.current + 1) % len;
        Ok(&self.containers[self.current])
    }

    /// Move to the previous container, wrapping from the first to the last.
    pub fn previous(&mut self) -> Result<&Container, ViewerError> {
        let len = self.containers.len();
        if len == 0 {
            return Err(ViewerError::EmptyCollection);
        }
        self.current = (self.current + len - 1) % len;
        Ok(&self.containers[self.current])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SelectionModel {
        SelectionModel::new(vec![
            Container::new("id-web", "web", "nginx"),
            Container::new("id-db", "db", "postgres"),
            Container::new("id-cache", "cache", "redis"),
        ])
    }

    #[test]
    fn test_starts_at_first_container() {
        let model = model();
        assert_eq!(model.index(), 0);
        assert_eq!(model.current().map(|c| c.display_name.as_str()), Some("web"));
    }

    #[test]
    fn test_next_wraps_forward() {
        let mut model = model();
        assert_eq!(model.next().expect("next").display_name, "db");
        assert_eq!(model.index(), 1);
        assert_eq!(model.next().expect("next").display_name, "cache");
        assert_eq!(model.index(), 2);
        assert_eq!(model.next().expect("next").display_name, "web");
        assert_eq!(model.index(), 0);
    }

    #[test]
    fn test_previous_wraps_backward() {
        let mut model = model();
        assert_eq!(model.previous().expect("previous").display_name, "cache");
        assert_eq!(model.index(), 2);
    }

    #[test]
    fn test_next_then_previous_round_trips() {
        let mut model = model();
        for start in 0..model.len() {
            while model.index() != start {
                model.next().expect("next");
            }
            model.next().expect("next");
            model.previous().expect("previous");
            assert_eq!(model.index(), start);
        }
    }

    #[test]
    fn test_len_nexts_return_to_start() {
        let mut model = model();
        model.next().expect("next");
        let start = model.index();
        for _ in 0..model.len() {
            model.next().expect("next");
        }
        assert_eq!(model.index(), start);
    }

    #[test]
    fn test_empty_collection_fails_without_side_effects() {
        let mut model = SelectionModel::new(Vec::new());
        assert!(matches!(model.next(), Err(ViewerError::EmptyCollection)));
        assert!(matches!(model.previous(), Err(ViewerError::EmptyCollection)));
        assert_eq!(model.index(), 0);
        assert!(model.current().is_none());
        assert!(model.is_empty());
    }

    #[test]
    fn test_single_container_wraps_onto_itself() {
        let mut model = SelectionModel::new(vec![Container::new("only", "only", "busybox")]);
        assert_eq!(model.next().expect("next").id, "only");
        assert_eq!(model.previous().expect("previous").id, "only");
        assert_eq!(model.index(), 0);
    }
}
