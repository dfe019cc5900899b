use std::collections::HashSet;

use super::model::{ContextGroup, Dataset};

// ---------------------------------------------------------------------------
// Grouping by context
// ---------------------------------------------------------------------------

/// Unique context values in order of first appearance (not sorted).
pub fn distinct_contexts(dataset: &Dataset) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::new();
    dataset
        .records()
        .iter()
        .map(|r| r.context.as_str())
        .filter(|ctx| seen.insert(*ctx))
        .collect()
}

/// Records whose context equals `context`, keeping dataset order.
/// An unknown context gives an empty group.
pub fn filter_by_context<'a>(dataset: &'a Dataset, context: &'a str) -> ContextGroup<'a> {
    ContextGroup {
        context,
        records: dataset
            .records()
            .iter()
            .filter(|r| r.context == context)
            .collect(),
    }
}

/// One group per distinct context, in first-appearance order.
///
/// Every record lands in exactly one group.
pub fn partition(dataset: &Dataset) -> Vec<ContextGroup<'_>> {
    distinct_contexts(dataset)
        .into_iter()
        .map(|ctx| filter_by_context(dataset, ctx))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            Record::new("b", "x", 1),
            Record::new("a", "y", 2),
            Record::new("b", "z", 3),
            Record::new("c", "x", 4),
            Record::new("a", "x", 5),
            Record::new("b", "x", 6),
        ])
    }

    #[test]
    fn contexts_follow_first_appearance() {
        let ds = sample();
        assert_eq!(distinct_contexts(&ds), vec!["b", "a", "c"]);
        // Stable across calls.
        assert_eq!(distinct_contexts(&ds), distinct_contexts(&ds.clone()));
    }

    #[test]
    fn empty_dataset_has_no_contexts() {
        let ds = Dataset::default();
        assert!(distinct_contexts(&ds).is_empty());
        assert!(partition(&ds).is_empty());
    }

    #[test]
    fn filter_keeps_relative_order_and_duplicates() {
        let ds = sample();
        let group = filter_by_context(&ds, "b");
        let bars: Vec<_> = group.bars().collect();
        assert_eq!(bars, vec![("x", 1), ("z", 3), ("x", 6)]);
    }

    #[test]
    fn unknown_context_gives_empty_group() {
        let ds = sample();
        let group = filter_by_context(&ds, "nope");
        assert!(group.is_empty());
        assert_eq!(group.context, "nope");
    }

    #[test]
    fn partition_is_total_and_disjoint() {
        let ds = sample();
        let groups = partition(&ds);

        let total: usize = groups.iter().map(|g| g.len()).sum();
        assert_eq!(total, ds.len());

        for record in ds.records() {
            let owners = groups
                .iter()
                .filter(|g| g.records.iter().any(|r| std::ptr::eq(*r, record)))
                .count();
            assert_eq!(owners, 1);
        }
        for g in &groups {
            assert!(!g.is_empty());
            assert!(g.records.iter().all(|r| r.context == g.context));
        }
    }
}
