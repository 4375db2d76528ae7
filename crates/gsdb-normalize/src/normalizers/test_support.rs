//! Row builders shared by the per-brand tests.

use gsdb_core::{CanonicalStation, ExclusionRecord, RawRow};

use super::RowOutcome;

/// Build a raw row from `base`, replacing or adding the `overrides`.
pub(super) fn raw_row<'s>(
    base: &[(&'s str, &'s str)],
    overrides: &[(&'s str, &'s str)],
) -> RawRow {
    let mut fields: Vec<(&str, &str)> = base.to_vec();
    for &(k, v) in overrides {
        if let Some(slot) = fields.iter_mut().find(|(fk, _)| *fk == k) {
            slot.1 = v;
        } else {
            fields.push((k, v));
        }
    }
    fields.into_iter().collect()
}

pub(super) fn kept(outcome: RowOutcome) -> CanonicalStation {
    match outcome {
        RowOutcome::Kept(station) => station,
        RowOutcome::Excluded(record) => panic!("unexpected exclusion: {record:?}"),
    }
}

pub(super) fn excluded(outcome: RowOutcome) -> ExclusionRecord {
    match outcome {
        RowOutcome::Excluded(record) => record,
        RowOutcome::Kept(station) => panic!("unexpected station: {station:?}"),
    }
}
