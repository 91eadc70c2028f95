/// Sort `(item, distance_km)` pairs nearest first
///
/// The sort is stable, so entries at exactly the same distance keep the
/// order they had in the candidate set.
pub fn rank_by_distance<T>(candidates: &mut [(T, f64)]) {
    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_first() {
        let mut ranked = vec![("far", 12.0), ("near", 0.4), ("mid", 3.3)];
        rank_by_distance(&mut ranked);

        let order: Vec<_> = ranked.iter().map(|(name, _)| *name).collect();
        assert_eq!(order, vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut ranked = vec![("B", 3.0), ("C", 1.0), ("A", 3.0), ("D", 3.0)];
        rank_by_distance(&mut ranked);

        let order: Vec<_> = ranked.iter().map(|(name, _)| *name).collect();
        assert_eq!(order, vec!["C", "B", "A", "D"]);
    }

    #[test]
    fn test_full_precision_is_used() {
        // Both present as 2.0 km but the second one is nearer
        let mut ranked = vec![("first", 2.04), ("second", 1.96)];
        rank_by_distance(&mut ranked);

        assert_eq!(ranked[0].0, "second");
    }
}
