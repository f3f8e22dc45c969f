//! De-duplication of consecutive identical payloads.

/// Admits a payload only if it differs from the last admitted one.
///
/// Comparison is byte for byte on the encoded text, so two flushes that
/// encode identically produce a single transmission.
#[derive(Debug, Clone, Default)]
pub struct PayloadGate {
    last: Option<String>,
}

impl PayloadGate {
    /// Create a gate that admits the first payload it sees.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the payload if it should be transmitted, remembering it.
    pub fn admit(&mut self, payload: String) -> Option<String> {
        if self.last.as_deref() == Some(payload.as_str()) {
            return None;
        }
        self.last = Some(payload.clone());
        Some(payload)
    }

    /// The most recently admitted payload.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Forget the last payload so the next one is admitted unconditionally.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
