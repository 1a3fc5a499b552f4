//! Keyboard focus cycling over a fixed, ordered set of panes.

use crate::error::ViewerError;

/// Panes that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    ContainerList,
    LogView,
}

impl FocusPane {
    /// Default focus order: list first, then logs.
    pub const ORDER: [FocusPane; 2] = [FocusPane::ContainerList, FocusPane::LogView];
}

#[derive(Debug, Clone)]
pub struct FocusController<T> {
    regions: Vec<T>,
    current: usize,
}

impl<T: Copy> FocusController<T> {
    /// Focus starts on the first region.
    pub fn new(regions: Vec<T>) -> Result<Self, ViewerError> {
        if regions.is_empty() {
            return Err(ViewerError::EmptyCollection);
        }
        Ok(Self {
            regions,
            current: 0,
        })
    }

    pub fn current(&self) -> T {
        self.regions[self.current]
    }

    pub fn cycle_forward(&mut self) -> T {
        self.current = (self.current + 1) % self.regions.len();
        self.regions[self.current]
    }
}

impl Default for FocusController<FocusPane> {
    fn default() -> Self {
        Self {
            regions: FocusPane::ORDER.to_vec(),
            current: 0,
        }
    }
}
