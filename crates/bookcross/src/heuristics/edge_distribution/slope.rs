//! Slope-based edge distribution.
//!
//! Drawing the vertices on a circle at their spine positions, edges with
//! similar slope rarely interleave. The slope of the chord between
//! positions `x < y` is determined (mod π) by `x + y` alone, so no
//! trigonometry is needed: fold `x + y` into `[1, n]` and split that range
//! into `k` roughly equal contiguous sections, one per page.

use crate::model::Embedding;

/// Assigns every edge the page of its slope section.
pub fn slope_distribution(embedding: &mut Embedding) {
    let k = embedding.k();
    if k == 1 {
        super::single_page(embedding);
        return;
    }

    let n = embedding.n();
    let angle_to_page = build_angle_map(n, k);

    let mut distribution = embedding.distribution().to_vec();
    for (e, page) in distribution.iter_mut().enumerate() {
        let angle = edge_angle(embedding, e);
        *page = angle_to_page[angle - 1];
    }

    embedding.set_distribution(&distribution);
}

/// Chord angle of the edge, an integer in `[1, n]`.
fn edge_angle(embedding: &Embedding, edge_index: usize) -> usize {
    let edge = embedding.graph().edge(edge_index);
    let angle = embedding.smaller_endpoint_position(edge) + embedding.larger_endpoint_position(edge);
    if angle > embedding.n() {
        angle - embedding.n()
    } else {
        angle
    }
}

/// Splits `[1, n]` into `k` contiguous sections of nearly equal size.
fn build_angle_map(n: usize, k: usize) -> Vec<usize> {
    let epsilon = 1e-9;
    let section_size = n as f64 / k as f64 + epsilon;
    let mut map = vec![0usize; n];
    let mut current_limit = section_size;
    let mut current_page = 0usize;
    for i in 1..=n {
        if (i as f64) < current_limit {
            map[i - 1] = current_page;
        } else {
            current_page += 1;
            map[i - 1] = current_page;
            current_limit += section_size;
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Problem};

    #[test]
    fn angle_map_is_monotone_and_covers_all_pages() {
        for (n, k) in [(10usize, 2usize), (10, 3), (7, 4), (12, 5)] {
            let map = build_angle_map(n, k);
            assert_eq!(map.len(), n);
            assert!(map.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(*map.last().unwrap(), k - 1);
            assert_eq!(map[0], 0);
        }
    }

    #[test]
    fn parallel_chords_share_a_page() {
        // on the identity spine of an 8-cycle the chords (0,3) and (1,2)
        // have the same angle
        let g = Graph::from_edges(8, &[(0, 3), (1, 2), (4, 7), (5, 6)]).unwrap();
        let p = Problem::new(g, 2).unwrap();
        let mut e = crate::model::Embedding::new(&p);
        slope_distribution(&mut e);
        assert_eq!(e.page_of(0), e.page_of(1));
        assert_eq!(e.page_of(2), e.page_of(3));
        e.validate().unwrap();
    }
}
