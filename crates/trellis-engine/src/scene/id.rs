slotmap::new_key_type! {
    /// Stable handle of a node inside a [`Scene`](super::Scene).
    ///
    /// Handles of removed nodes never resolve again, even if the slot is reused.
    pub struct NodeId;
}
