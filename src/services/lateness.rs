use time::PrimitiveDateTime;

/// Both instants are naive UTC. Submitting exactly at the due instant is on time.
pub(crate) fn is_late(submitted_at: PrimitiveDateTime, due_date: Option<PrimitiveDateTime>) -> bool {
    due_date.is_some_and(|due| submitted_at > due)
}
