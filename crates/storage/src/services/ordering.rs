use std::collections::{BTreeMap, HashSet};

use super::conflicts::SharedEntities;

/// Class ids ranked by combined shared-horse and shared-rider weight, heaviest first.
///
/// Classes with no shared entity are absent; see [`complete_order`].
/// Equal weights are ordered by class id ascending.
pub fn order_by_shared_weight(shared: &SharedEntities) -> Vec<i32> {
    let mut weights: BTreeMap<i32, u64> = BTreeMap::new();

    for counts in [&shared.horses, &shared.riders] {
        for (class_id, entities) in counts {
            let total: u64 = entities.values().map(|count| u64::from(*count)).sum();
            *weights.entry(*class_id).or_default() += total;
        }
    }

    let mut ranked: Vec<(i32, u64)> = weights.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    ranked.into_iter().map(|(class_id, _)| class_id).collect()
}

/// Append every class missing from `priority`, by id ascending.
///
/// Ids in `priority` that are not part of `class_ids` are dropped.
pub fn complete_order(priority: &[i32], class_ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut remaining: Vec<i32> = class_ids.into_iter().collect();
    remaining.sort_unstable();
    remaining.dedup();

    let known: HashSet<i32> = remaining.iter().copied().collect();
    let mut seen = HashSet::new();

    let mut order: Vec<i32> = priority
        .iter()
        .copied()
        .filter(|id| known.contains(id) && seen.insert(*id))
        .collect();

    order.extend(remaining.into_iter().filter(|id| !seen.contains(id)));
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Inscription;
    use crate::services::conflicts::{SharedCounts, analyze};

    fn shared(horses: &[(i32, &[(i32, u32)])], riders: &[(i32, &[(i32, u32)])]) -> SharedEntities {
        let build = |rows: &[(i32, &[(i32, u32)])]| -> SharedCounts {
            rows.iter()
                .map(|(class_id, entities)| (*class_id, entities.iter().copied().collect()))
                .collect()
        };

        SharedEntities {
            horses: build(horses),
            riders: build(riders),
        }
    }

    #[test]
    fn test_single_shared_class() {
        let inscriptions = vec![
            Inscription {
                id: 1,
                horse_id: 5,
                rider_id: 10,
                class_id: 1,
                rider_entry_number: 1,
            },
            Inscription {
                id: 2,
                horse_id: 5,
                rider_id: 11,
                class_id: 1,
                rider_entry_number: 2,
            },
            Inscription {
                id: 3,
                horse_id: 6,
                rider_id: 12,
                class_id: 2,
                rider_entry_number: 3,
            },
        ];

        assert_eq!(order_by_shared_weight(&analyze(&inscriptions)), vec![1]);
    }

    #[test]
    fn test_horse_and_rider_weights_are_combined() {
        let shared = shared(
            &[(1, &[(5, 2)]), (2, &[(6, 3)])],
            &[(1, &[(10, 2), (11, 2)])],
        );

        // class 1: 2 + 4 = 6, class 2: 3
        assert_eq!(order_by_shared_weight(&shared), vec![1, 2]);
    }

    #[test]
    fn test_heaviest_first() {
        let shared = shared(&[(1, &[(5, 2)]), (2, &[(6, 4)]), (3, &[(7, 3)])], &[]);

        assert_eq!(order_by_shared_weight(&shared), vec![2, 3, 1]);
    }

    #[test]
    fn test_ties_break_by_class_id() {
        let shared = shared(&[(9, &[(5, 2)]), (3, &[(6, 2)])], &[(4, &[(10, 2)])]);

        assert_eq!(order_by_shared_weight(&shared), vec![3, 4, 9]);
    }

    #[test]
    fn test_empty_input() {
        assert!(order_by_shared_weight(&SharedEntities::default()).is_empty());
    }

    #[test]
    fn test_complete_order_appends_missing_classes() {
        assert_eq!(complete_order(&[7, 2], [1, 2, 3, 7, 5]), vec![7, 2, 1, 3, 5]);
    }

    #[test]
    fn test_complete_order_drops_unknown_ids() {
        assert_eq!(complete_order(&[42, 2], [2, 1]), vec![2, 1]);
        assert!(complete_order(&[1], []).is_empty());
    }
}
