//! Transitive closure over direct generalization or specialization edges.

use indexmap::IndexSet;

use super::TypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Done,
}

/// For every node, all nodes reachable through `edges`, nearest first.
///
/// `edges[i]` lists the direct successors of node `i`. A cycle fails the
/// whole pass with the node at which it was detected.
pub(crate) fn transitive_closure(edges: &[IndexSet<TypeId>]) -> Result<Vec<IndexSet<TypeId>>, TypeId> {
    let mut pass = ClosurePass {
        edges,
        state: vec![Visit::Unvisited; edges.len()],
        reach: vec![IndexSet::new(); edges.len()],
    };
    for node in 0..edges.len() {
        pass.visit(TypeId::new(node))?;
    }
    Ok(pass.reach)
}

struct ClosurePass<'a> {
    edges: &'a [IndexSet<TypeId>],
    state: Vec<Visit>,
    reach: Vec<IndexSet<TypeId>>,
}

impl ClosurePass<'_> {
    fn visit(&mut self, node: TypeId) -> Result<(), TypeId> {
        let i = node.index();
        match self.state[i] {
            Visit::Done => return Ok(()),
            Visit::InProgress => return Err(node),
            Visit::Unvisited => {}
        }
        self.state[i] = Visit::InProgress;

        let edges = self.edges;
        for &next in &edges[i] {
            self.visit(next)?;
        }

        // Direct successors first, then theirs in edge order.
        let mut reach: IndexSet<TypeId> = edges[i].iter().copied().collect();
        for &next in &edges[i] {
            reach.extend(self.reach[next.index()].iter().copied());
        }

        tracing::trace!(node = i, reachable = reach.len(), "closed");
        self.reach[i] = reach;
        self.state[i] = Visit::Done;
        Ok(())
    }
}
