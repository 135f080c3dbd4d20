//! Display port for per-tick status.

use crate::domain::DisplayUpdate;

/// Port for rendering per-tick status.
pub trait DisplayRenderer: Send + Sync {
    /// Renders one tick.
    fn render(&self, update: &DisplayUpdate);
}
