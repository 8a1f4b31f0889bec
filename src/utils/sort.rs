/// Create the indices that can be used to sort the given array of small
/// non-negative keys (counting sort, stable).
///
/// ```rust
/// use acmd::utils::get_sort_indices;
///
/// let unsorted_vec = vec![2, 0, 1];
/// let indices = get_sort_indices(&unsorted_vec);
/// assert_eq!(indices, vec![1, 2, 0]);
///
/// assert_eq!(0, unsorted_vec[indices[0]]);
/// assert_eq!(1, unsorted_vec[indices[1]]);
/// assert_eq!(2, unsorted_vec[indices[2]]);
/// ```
pub fn get_sort_indices(input_vec: &[usize]) -> Vec<usize> {
    let max_value = input_vec.iter().max();
    let new_len = match max_value {
        Some(v) => *v + 1,
        None => return Vec::new(),
    };
    let mut counts = vec![0usize; new_len];

    for b in input_vec {
        counts[*b] += 1;
    }
    for i in 1..new_len {
        counts[i] += counts[i - 1];
    }

    let len = input_vec.len();
    let mut output = vec![0usize; len];
    for i in (0..len).rev() {
        let j = input_vec[i];
        counts[j] -= 1;
        output[counts[j]] = i;
    }
    output
}

/// Start offsets of each key in the sorted order produced by
/// [`get_sort_indices`]. The returned vector has `num_keys + 1` entries so that
/// the members of key `k` are `sorted[starts[k]..starts[k + 1]]`.
///
/// ```rust
/// use acmd::utils::key_start_offsets;
///
/// assert_eq!(key_start_offsets(&[2, 0, 2, 0], 4), vec![0, 2, 2, 4, 4]);
/// ```
pub fn key_start_offsets(keys: &[usize], num_keys: usize) -> Vec<usize> {
    let mut starts = vec![0usize; num_keys + 1];
    for &k in keys {
        starts[k + 1] += 1;
    }
    for k in 0..num_keys {
        starts[k + 1] += starts[k];
    }
    starts
}
