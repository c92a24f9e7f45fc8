//! Open-edges sweep counter.
//!
//! Walks the spine left to right. Opening an edge pushes it on its page's
//! stack in the order it is embedded around the vertex; closing an edge
//! crosses exactly the edges sitting above it on that stack (they opened
//! later and are still open), so they are counted and the edge is removed
//! from the middle of the stack.

use crate::model::Embedding;

pub(super) fn count(embedding: &Embedding) -> u64 {
    let g = embedding.graph();
    let n = embedding.n();
    let m = embedding.m();
    if m == 0 {
        return 0;
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| embedding.compare_edges_outgoing_as_embedded(g.edge(a), g.edge(b)));

    let mut open_per_page: Vec<Vec<usize>> = vec![Vec::new(); embedding.k()];
    // edges waiting to be closed, keyed by their larger endpoint's vertex
    let mut closing_at: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut crossings = 0u64;
    let mut next = 0usize;

    for position in 0..n {
        let vertex = embedding.vertex_at(position);

        // close incoming edges, shortest first (they were appended last)
        let pending = std::mem::take(&mut closing_at[vertex]);
        for &edge in pending.iter().rev() {
            let stack = &mut open_per_page[embedding.page_of(edge)];
            let mut i = stack.len();
            loop {
                i -= 1;
                if stack[i] == edge {
                    stack.remove(i);
                    break;
                }
                crossings += 1;
            }
        }

        // open outgoing edges in as-embedded order
        while next < m {
            let edge = order[next];
            if embedding.smaller_endpoint_position(g.edge(edge)) != position {
                break;
            }
            let other = g.edge(edge).other_end(vertex);
            closing_at[other].push(edge);
            open_per_page[embedding.page_of(edge)].push(edge);
            next += 1;
        }
    }

    debug_assert!(open_per_page.iter().all(Vec::is_empty));
    crossings
}

pub(super) fn count_on_page(embedding: &Embedding, page: usize) -> u64 {
    let g = embedding.graph();
    let n = embedding.n();

    let mut open: Vec<usize> = Vec::new();
    let mut crossings = 0u64;

    for position in 0..n {
        let vertex = embedding.vertex_at(position);
        let mut incident: Vec<usize> = g
            .vertex(vertex)
            .edge_ids()
            .iter()
            .copied()
            .filter(|&e| embedding.page_of(e) == page)
            .collect();
        incident
            .sort_by(|&a, &b| embedding.compare_edges_sharing_endpoint(g.edge(a), g.edge(b), position));

        for edge in incident {
            let other = g.edge(edge).other_end(vertex);
            if embedding.position_of(other) < position {
                let mut i = open.len();
                loop {
                    i -= 1;
                    if open[i] == edge {
                        open.remove(i);
                        break;
                    }
                    crossings += 1;
                }
            } else {
                open.push(edge);
            }
        }
    }

    debug_assert!(open.is_empty());
    crossings
}
