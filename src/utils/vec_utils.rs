use rayon::prelude::*;

pub fn count_none_elements<T: Sync>(vec_of_options: &[Option<T>]) -> usize {
    vec_of_options
        .par_iter()
        .filter(|option| option.is_none())
        .count()
}

/// Index of the first Some element, if any.
/// Indicator series lead with a None warm-up gap, so this marks where the data starts.
pub fn first_some_index<T>(vec: &[Option<T>]) -> Option<usize> {
    vec.iter().position(|item| item.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_helpers() {
        let v: Vec<Option<f64>> = vec![None, None, Some(1.0), Some(2.0)];
        assert_eq!(count_none_elements(&v), 2);
        assert_eq!(first_some_index(&v), Some(2));

        let all_some: Vec<Option<f64>> = vec![Some(1.0)];
        assert_eq!(count_none_elements(&all_some), 0);
        assert_eq!(first_some_index(&all_some), Some(0));

        let all_none: Vec<Option<f64>> = vec![None, None];
        assert_eq!(first_some_index(&all_none), None);
    }
}
