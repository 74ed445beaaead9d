//! Per-session viewer state

/// Identifies one refresh request. Later requests carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Selected region and the last snapshot shown for it.
///
/// Passed into every service call; the service keeps no selection state.
#[derive(Debug, Default)]
pub struct ViewerContext {
    current_region: Option<String>,
    last_snapshot_id: Option<i64>,
    issued: u64,
}

impl ViewerContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `region_code` and issue the token for its request
    pub fn begin(&mut self, region_code: &str) -> RequestToken {
        self.issued += 1;
        self.current_region = Some(region_code.to_string());
        RequestToken(self.issued)
    }

    /// Only the most recently issued token is current
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    pub fn current_region(&self) -> Option<&str> {
        self.current_region.as_deref()
    }

    pub fn last_snapshot_id(&self) -> Option<i64> {
        self.last_snapshot_id
    }

    pub(crate) fn record_snapshot(&mut self, snapshot_id: i64) {
        self.last_snapshot_id = Some(snapshot_id);
    }
}
