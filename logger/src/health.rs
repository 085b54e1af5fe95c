/// Overall publish health, shared by every activity.
///
/// A single last-writer-wins flag: any failed publish or poll degrades it,
/// any later success heals it, even when the success came from the other
/// activity. The liveness flash reads it to pick its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Healthy,
    Degraded,
}

impl Health {
    pub fn record(&mut self, ok: bool) {
        *self = if ok {
            Health::Healthy
        } else {
            Health::Degraded
        };
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Health::Healthy)
    }
}

impl Default for Health {
    fn default() -> Self {
        Health::Healthy
    }
}
