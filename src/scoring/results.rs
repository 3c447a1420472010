use crate::meet::types::PlaceResult;

fn sorted_by_place(results: &[PlaceResult]) -> Vec<&PlaceResult> {
    let mut sorted: Vec<&PlaceResult> = results.iter().collect();
    sorted.sort_by_key(|r| r.place);
    sorted
}

/// Number of placements, tie spans included, recorded at or above `up_to_place`.
pub fn consumed_place_count(results: &[PlaceResult], up_to_place: u32) -> usize {
    sorted_by_place(results)
        .into_iter()
        .take_while(|r| r.place <= up_to_place)
        .map(|r| r.team_ids.len())
        .sum()
}

/// Check that no result sits inside the span of an earlier tie.
/// Returns all conflicts at once (not just the first).
pub fn validate_results(results: &[PlaceResult]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    // u64 so a tie ending past u32::MAX still fits
    let mut next_valid_place: u64 = 1;
    let mut last_tie: Option<(u32, usize)> = None;

    for result in sorted_by_place(results) {
        if result.place == 0 || result.team_ids.is_empty() {
            continue;
        }

        if u64::from(result.place) < next_valid_place {
            let message = match last_tie {
                Some((start, tied)) => format!(
                    "Place {} conflicts with the {}-way tie at place {} (spans places {}-{})",
                    result.place,
                    tied,
                    start,
                    start,
                    next_valid_place - 1
                ),
                None => format!("Place {} is already taken", result.place),
            };
            errors.push(message);
        } else {
            next_valid_place = u64::from(result.place) + result.team_ids.len() as u64;
            last_tie = if result.team_ids.len() > 1 {
                Some((result.place, result.team_ids.len()))
            } else {
                None
            };
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(place: u32, ids: &[&str]) -> PlaceResult {
        PlaceResult {
            place,
            team_ids: ids.iter().map(|id| id.to_string()).collect(),
        }
    }

    #[test]
    fn test_three_way_tie_blocks_next_two_places() {
        let results = vec![
            result(1, &["A", "B", "C"]),
            result(2, &["D"]),
            result(3, &["E"]),
        ];
        let errors = validate_results(&results).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Place 2"));
        assert!(errors[1].contains("Place 3"));
        assert!(errors[0].contains("spans places 1-3"));
    }

    #[test]
    fn test_place_after_tie_span_is_valid() {
        let results = vec![result(1, &["A", "B"]), result(3, &["C"]), result(4, &["D"])];
        assert!(validate_results(&results).is_ok());
    }

    #[test]
    fn test_no_ties_is_valid_in_any_order() {
        let results = vec![result(3, &["C"]), result(1, &["A"]), result(5, &["E"]), result(2, &["B"])];
        assert!(validate_results(&results).is_ok());
    }

    #[test]
    fn test_empty_list_is_valid() {
        assert!(validate_results(&[]).is_ok());
    }

    #[test]
    fn test_appending_into_tie_span_adds_error() {
        let mut results = vec![result(2, &["A", "B", "C"]), result(5, &["D"])];
        assert!(validate_results(&results).is_ok());

        results.push(result(4, &["E"]));
        let errors = validate_results(&results).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("tie at place 2"));
    }

    #[test]
    fn test_duplicate_place_without_tie() {
        let results = vec![result(1, &["A"]), result(1, &["B"])];
        let errors = validate_results(&results).unwrap_err();
        assert_eq!(errors, vec!["Place 1 is already taken".to_string()]);
    }

    #[test]
    fn test_flagged_overlap_does_not_move_cursor() {
        // The conflicting 2-way tie at place 2 must not push the cursor to 4
        let results = vec![result(1, &["A", "B", "C"]), result(2, &["D", "E"]), result(4, &["F"])];
        let errors = validate_results(&results).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_place_zero_is_ignored() {
        let results = vec![result(0, &["A"]), result(0, &["B"]), result(1, &["C"])];
        assert!(validate_results(&results).is_ok());
    }

    #[test]
    fn test_tie_at_highest_place_does_not_overflow() {
        let results = vec![
            result(u32::MAX, &["A", "B"]),
            result(u32::MAX, &["C"]),
        ];
        let errors = validate_results(&results).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains(&format!("spans places {}-{}", u32::MAX, u64::from(u32::MAX) + 1)));
    }

    #[test]
    fn test_consumed_place_count_includes_tie_spans() {
        let results = vec![result(4, &["D"]), result(1, &["A", "B"]), result(3, &["C"])];
        assert_eq!(consumed_place_count(&results, 0), 0);
        assert_eq!(consumed_place_count(&results, 1), 2);
        assert_eq!(consumed_place_count(&results, 3), 3);
        assert_eq!(consumed_place_count(&results, 10), 4);
    }
}
