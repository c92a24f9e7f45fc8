//! Divide-and-conquer counter.
//!
//! Per page: sort the edges by `(smaller, larger)` endpoint position. For an
//! edge spanning `(s, t)`, the number of edges whose smaller endpoint lies
//! strictly between `s` and `t` over-counts its crossings by exactly the
//! pairs nested inside it. Directing every edge from its smaller to its
//! larger endpoint and splitting each spine vertex into an outgoing and an
//! incoming copy turns the arc drawing into a two-layer bipartite drawing in
//! which precisely the nested pairs cross, so the correction term is an
//! inversion count over the sorted edge list: order by larger endpoint,
//! ties by smaller endpoint descending, and count inversions with a
//! merge sort.

use crate::model::Embedding;

pub(super) fn count(embedding: &Embedding) -> u64 {
    embedding
        .edges_grouped_by_page()
        .into_iter()
        .map(|mut page_edges| count_same_page(embedding, &mut page_edges))
        .sum()
}

pub(super) fn count_on_page(embedding: &Embedding, page: usize) -> u64 {
    let mut page_edges = embedding.edge_indices_on_page(page);
    count_same_page(embedding, &mut page_edges)
}

/// Counts the crossings among `edges`, which must all lie on one page.
fn count_same_page(embedding: &Embedding, edges: &mut Vec<usize>) -> u64 {
    if edges.len() <= 1 {
        return 0;
    }
    let g = embedding.graph();
    edges.sort_by(|&a, &b| embedding.compare_edges(g.edge(a), g.edge(b)));

    // prefix sums: starts_before[p] = edges with smaller endpoint <= p
    let n = embedding.n();
    let mut starts_before = vec![0i64; n];
    for &e in edges.iter() {
        starts_before[embedding.smaller_endpoint_position(g.edge(e))] += 1;
    }
    for p in 1..n {
        starts_before[p] += starts_before[p - 1];
    }

    // upper bound: every edge starting strictly inside (s, t)
    let last_position = n - 1;
    let mut count: i64 = 0;
    for &e in edges.iter() {
        let s = embedding.smaller_endpoint_position(g.edge(e));
        let t = embedding.larger_endpoint_position(g.edge(e));
        if s == last_position {
            continue;
        }
        count += starts_before[t - 1] - starts_before[s];
    }

    // subtract the nested pairs = bipartite inversions
    let mut output = vec![0usize; edges.len()];
    count -= bipartite_inversions(embedding, edges, 0, edges.len(), &mut output) as i64;

    assert!(
        count >= 0,
        "crossing count became negative ({count}) on a page with {} edges",
        edges.len()
    );
    count as u64
}

/// Counts inversions of the two-layer drawing over
/// `input[start..start + length)` with a merge sort, leaving the merged
/// order in `output` (larger endpoint ascending, ties smaller endpoint
/// descending).
fn bipartite_inversions(
    embedding: &Embedding,
    input: &[usize],
    start: usize,
    length: usize,
    output: &mut [usize],
) -> u64 {
    debug_assert!(length > 0);
    if length == 1 {
        output[0] = input[start];
        return 0;
    }

    let g = embedding.graph();
    let left_size = length / 2;
    let right_size = length - left_size;

    let mut left = vec![0usize; left_size];
    let mut right = vec![0usize; right_size];
    let mut count = bipartite_inversions(embedding, input, start, left_size, &mut left)
        + bipartite_inversions(embedding, input, start + left_size, right_size, &mut right);

    let mut i = 0;
    let mut j = 0;
    while i < left_size && j < right_size {
        let le = g.edge(left[i]);
        let re = g.edge(right[j]);
        let left_end = embedding.larger_endpoint_position(le);
        let right_end = embedding.larger_endpoint_position(re);
        let left_first = left_end < right_end
            || (left_end == right_end
                && embedding.smaller_endpoint_position(le)
                    >= embedding.smaller_endpoint_position(re));
        if left_first {
            output[i + j] = left[i];
            i += 1;
        } else {
            output[i + j] = right[j];
            j += 1;
            count += (left_size - i) as u64;
        }
    }
    while i < left_size {
        output[right_size + i] = left[i];
        i += 1;
    }
    while j < right_size {
        output[left_size + j] = right[j];
        j += 1;
    }

    count
}
