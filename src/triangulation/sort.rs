//! Index sort keyed by a distance table.

/// Ranges at or below this length are finished with insertion sort.
const INSERTION_SORT_THRESHOLD: isize = 20;

/// Sorts `ids` in ascending order of `dists[id]`.
///
/// Median-of-three quicksort over the index array; the distance table itself
/// is never moved. Small ranges fall back to insertion sort, which keeps equal
/// keys in their original order.
pub(crate) fn sort_by_distance(ids: &mut [usize], dists: &[f64]) {
    if ids.len() > 1 {
        quicksort(ids, dists, 0, ids.len() as isize - 1);
    }
}

fn quicksort(ids: &mut [usize], dists: &[f64], left: isize, right: isize) {
    if right - left <= INSERTION_SORT_THRESHOLD {
        for i in (left + 1)..=right {
            let temp = ids[i as usize];
            let temp_dist = dists[temp];
            let mut j = i - 1;
            while j >= left && dists[ids[j as usize]] > temp_dist {
                ids[(j + 1) as usize] = ids[j as usize];
                j -= 1;
            }
            ids[(j + 1) as usize] = temp;
        }
        return;
    }

    let l = left as usize;
    let r = right as usize;
    let median = (l + r) >> 1;
    let mut i = l + 1;
    let mut j = r;

    ids.swap(median, i);
    if dists[ids[l]] > dists[ids[r]] {
        ids.swap(l, r);
    }
    if dists[ids[i]] > dists[ids[r]] {
        ids.swap(i, r);
    }
    if dists[ids[l]] > dists[ids[i]] {
        ids.swap(l, i);
    }

    let temp = ids[i];
    let temp_dist = dists[temp];
    loop {
        loop {
            i += 1;
            if dists[ids[i]] >= temp_dist {
                break;
            }
        }
        loop {
            j -= 1;
            if dists[ids[j]] <= temp_dist {
                break;
            }
        }
        if j < i {
            break;
        }
        ids.swap(i, j);
    }
    ids[l + 1] = ids[j];
    ids[j] = temp;

    let (i, j) = (i as isize, j as isize);
    if right - i + 1 >= j - left {
        quicksort(ids, dists, i, right);
        quicksort(ids, dists, left, j - 1);
    } else {
        quicksort(ids, dists, left, j - 1);
        quicksort(ids, dists, i, right);
    }
}
