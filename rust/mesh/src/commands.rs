// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host commands behind a submit/await barrier.
//!
//! High-level edits that a modelling host runs as built-in commands (loop cut,
//! consistent normals) are requested through [`CommandHost`]. A command is
//! first submitted, which returns a [`Ticket`], and then awaited. Only one
//! command may be pending at a time; the mesh must not be read by an operator
//! between `submit` and `wait`, and completing a command bumps the mesh
//! revision so callers can tell that derived state has to be recomputed.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::arena::EditMesh;
use crate::error::{Error, Result};
use crate::keys::*;

/// A command the host knows how to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Insert `cuts` evenly spaced edge loops across the quad ring through `edge`.
    LoopCut { edge: EdgeKey, cuts: usize },
    /// Make face windings consistent across shared edges.
    ///
    /// Acts on the selected faces, or on all faces when none are selected.
    /// Closed surfaces end up facing outward, or inward when `inside` is set.
    RecalculateNormals { inside: bool },
}

/// Receipt for a submitted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PendingCommand {
    pub ticket: Ticket,
    pub command: Command,
}

/// What a loop cut created and destroyed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopCutOutcome {
    /// The ring edges that were split (these keys are no longer valid).
    pub ring_edges: Vec<EdgeKey>,
    /// The ring quads that were replaced (these keys are no longer valid).
    pub removed_faces: Vec<FaceKey>,
    pub new_vertices: Vec<VertexKey>,
    pub new_edges: Vec<EdgeKey>,
    pub new_faces: Vec<FaceKey>,
}

impl LoopCutOutcome {
    /// Returns `true` when the cut found no quad ring to work on.
    pub fn is_empty(&self) -> bool {
        self.removed_faces.is_empty()
    }
}

/// Result of an awaited command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    LoopCut(LoopCutOutcome),
    Normals { flipped: usize },
}

/// A host that runs mesh commands to completion on request.
pub trait CommandHost {
    /// Enqueues a command. Fails with [`Error::CommandPending`] while an
    /// earlier command has not been awaited.
    fn submit(&mut self, command: Command) -> Result<Ticket>;

    /// Blocks until the command behind `ticket` has completed and its changes
    /// are visible to subsequent reads.
    fn wait(&mut self, ticket: Ticket) -> Result<CommandOutcome>;

    /// Submits a command and waits for it.
    fn run(&mut self, command: Command) -> Result<CommandOutcome> {
        let ticket = self.submit(command)?;
        self.wait(ticket)
    }
}

impl CommandHost for EditMesh {
    fn submit(&mut self, command: Command) -> Result<Ticket> {
        if let Some(pending) = &self.pending {
            return Err(Error::CommandPending(pending.ticket.id()));
        }
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        debug!(ticket = ticket.id(), ?command, "command submitted");
        self.pending = Some(PendingCommand { ticket, command });
        Ok(ticket)
    }

    fn wait(&mut self, ticket: Ticket) -> Result<CommandOutcome> {
        let pending = match self.pending.take() {
            Some(p) if p.ticket == ticket => p,
            other => {
                self.pending = other;
                return Err(Error::UnknownTicket(ticket.id()));
            }
        };

        let outcome = match pending.command {
            Command::LoopCut { edge, cuts } => CommandOutcome::LoopCut(self.loop_cut(edge, cuts)?),
            Command::RecalculateNormals { inside } => CommandOutcome::Normals {
                flipped: self.recalculate_normals(inside),
            },
        };
        self.revision += 1;
        debug!(ticket = ticket.id(), revision = self.revision, "command completed");
        Ok(outcome)
    }
}

// =============================================================================
// Loop cut
// =============================================================================

/// One quad of an edge ring with its corners in face-loop order. Side `a`
/// runs `p0 → p1`, side `b` runs `p2 → p3`.
struct RingQuad {
    face: FaceKey,
    a: EdgeKey,
    b: EdgeKey,
    corners: [VertexKey; 4],
}

impl EditMesh {
    /// Walks across quads from `start` through `face`, collecting each quad
    /// and the edge it is left through.
    fn walk_ring(
        &self,
        start: EdgeKey,
        face: FaceKey,
        visited: &mut FxHashSet<FaceKey>,
    ) -> (Vec<(FaceKey, EdgeKey)>, bool) {
        let mut steps = Vec::new();
        let mut entry = start;
        let mut face = face;
        loop {
            if visited.contains(&face) {
                return (steps, false);
            }
            let Some(exit) = self.opposite_edge(face, entry) else {
                return (steps, false);
            };
            visited.insert(face);
            steps.push((face, exit));
            if exit == start {
                return (steps, true);
            }
            if self.edge_face_count(exit) != 2 {
                return (steps, false);
            }
            match self.face_across(face, exit) {
                Some(next) => {
                    entry = exit;
                    face = next;
                }
                None => return (steps, false),
            }
        }
    }

    /// Collects the quad ring through `edge` as quads in ring order.
    fn edge_ring(&self, edge: EdgeKey) -> Vec<RingQuad> {
        let faces = self.edge_faces(edge);
        if faces.is_empty() || faces.len() > 2 {
            return Vec::new();
        }

        let mut visited = FxHashSet::default();
        let (forward, closed) = self.walk_ring(edge, faces[0], &mut visited);
        let backward = match (closed, faces.get(1)) {
            (false, Some(&other)) => self.walk_ring(edge, other, &mut visited).0,
            _ => Vec::new(),
        };

        // Ring edges e'k .. e'1, e0, e1 .. em with quad i between edges i and i+1.
        let mut ring: Vec<(FaceKey, EdgeKey, EdgeKey)> = Vec::new();
        let mut prev = edge;
        let mut back = Vec::new();
        for (face, exit) in backward {
            back.push((face, exit, prev));
            prev = exit;
        }
        ring.extend(back.into_iter().rev());
        prev = edge;
        for (face, exit) in forward {
            ring.push((face, prev, exit));
            prev = exit;
        }

        ring.into_iter()
            .filter_map(|(face, a, b)| {
                let data = self.faces.get(face)?;
                let ia = data.edges.iter().position(|&e| e == a)?;
                let corner = |k: usize| data.vertices[(ia + k) % 4];
                Some(RingQuad {
                    face,
                    a,
                    b,
                    corners: [corner(0), corner(1), corner(2), corner(3)],
                })
            })
            .collect()
    }

    /// Splits `edge` into `cuts + 1` equal pieces and returns the vertex chain
    /// from the edge's start to its end.
    fn split_evenly(
        &mut self,
        edge: EdgeKey,
        cuts: usize,
        outcome: &mut LoopCutOutcome,
    ) -> Result<Vec<VertexKey>> {
        let (start, end) = self.edge_vertices(edge).ok_or(Error::EdgeNotFound(edge))?;
        let mut chain = vec![start];
        let mut rest = edge;
        for k in 1..=cuts {
            let t = 1.0 / (cuts + 2 - k) as f64;
            let (vertex, _, second) = self.split_edge(rest, t)?;
            chain.push(vertex);
            outcome.new_vertices.push(vertex);
            rest = second;
        }
        chain.push(end);
        Ok(chain)
    }

    fn loop_cut(&mut self, edge: EdgeKey, cuts: usize) -> Result<LoopCutOutcome> {
        if !self.edges.contains_key(edge) {
            return Err(Error::EdgeNotFound(edge));
        }
        let mut outcome = LoopCutOutcome::default();
        let old_edges: FxHashSet<EdgeKey> = self.edges.keys().collect();
        let ring = self.edge_ring(edge);
        if ring.is_empty() || cuts == 0 {
            debug!(?edge, cuts, "loop cut found nothing to cut");
            return Ok(outcome);
        }

        let mut ring_edges: Vec<EdgeKey> = Vec::new();
        for quad in &ring {
            for e in [quad.a, quad.b] {
                if !ring_edges.contains(&e) {
                    ring_edges.push(e);
                }
            }
        }

        let mut chains: FxHashMap<EdgeKey, (VertexKey, Vec<VertexKey>)> = FxHashMap::default();
        for &e in &ring_edges {
            let (start, _) = self.edge_vertices(e).ok_or(Error::EdgeNotFound(e))?;
            let chain = self.split_evenly(e, cuts, &mut outcome)?;
            chains.insert(e, (start, chain));
        }
        let oriented = |edge: EdgeKey, from: VertexKey| -> Vec<VertexKey> {
            match chains.get(&edge) {
                Some((start, chain)) if *start == from => chain.clone(),
                Some((_, chain)) => chain.iter().rev().copied().collect(),
                None => Vec::new(),
            }
        };

        for quad in &ring {
            let [p0, _, p2, _] = quad.corners;
            let side_a = oriented(quad.a, p0);
            let side_b = {
                let mut b = oriented(quad.b, p2);
                b.reverse();
                b
            };
            if side_a.len() != cuts + 2 || side_b.len() != cuts + 2 {
                warn!(face = ?quad.face, "ring quad lost its sides during the cut");
                continue;
            }
            let selected = self.selected_faces.contains(&quad.face);
            self.remove_face(quad.face)?;
            outcome.removed_faces.push(quad.face);

            for k in 0..=cuts {
                let loop_ = [side_a[k], side_a[k + 1], side_b[k + 1], side_b[k]];
                match self.add_face(&loop_) {
                    Ok(face) => {
                        if selected {
                            self.selected_faces.insert(face);
                        }
                        outcome.new_faces.push(face);
                    }
                    Err(err) => warn!(face = ?quad.face, %err, "skipped sub-quad"),
                }
            }
        }

        outcome.new_edges = self
            .edges
            .keys()
            .filter(|e| !old_edges.contains(e))
            .collect();
        outcome.ring_edges = ring_edges;
        debug!(
            ?edge,
            cuts,
            quads = outcome.removed_faces.len(),
            new_faces = outcome.new_faces.len(),
            "loop cut applied"
        );
        Ok(outcome)
    }
}

// =============================================================================
// Consistent normals
// =============================================================================

impl EditMesh {
    /// Direction in which `face` traverses `edge`, as (from, to).
    fn traversal(&self, face: FaceKey, edge: EdgeKey) -> Option<(VertexKey, VertexKey)> {
        let data = self.faces.get(face)?;
        let i = data.edges.iter().position(|&e| e == edge)?;
        Some((data.vertices[i], data.vertices[(i + 1) % data.len()]))
    }

    fn recalculate_normals(&mut self, inside: bool) -> usize {
        let mut scope = self.selected_faces();
        if scope.is_empty() {
            scope = self.faces.keys().collect();
        }
        let in_scope: FxHashSet<FaceKey> = scope.iter().copied().collect();
        let mut flipped: FxHashMap<FaceKey, bool> = FxHashMap::default();
        let mut visited: FxHashSet<FaceKey> = FxHashSet::default();

        for &seed in &scope {
            if !visited.insert(seed) {
                continue;
            }
            let mut component = vec![seed];
            let mut queue = std::collections::VecDeque::from([seed]);
            while let Some(face) = queue.pop_front() {
                for edge in self.face_edges(face).to_vec() {
                    if self.edge_face_count(edge) != 2 {
                        continue;
                    }
                    let Some(next) = self.face_across(face, edge) else {
                        continue;
                    };
                    if !in_scope.contains(&next) || !visited.insert(next) {
                        continue;
                    }
                    if self.traversal(face, edge) == self.traversal(next, edge)
                        && self.flip_face(next).is_ok()
                    {
                        *flipped.entry(next).or_default() ^= true;
                    }
                    component.push(next);
                    queue.push_back(next);
                }
            }

            let members: FxHashSet<FaceKey> = component.iter().copied().collect();
            let closed = component.iter().all(|&f| {
                self.face_edges(f).iter().all(|&e| {
                    self.edge_faces(e).iter().filter(|g| members.contains(g)).count() == 2
                })
            });
            if closed {
                let volume = self.signed_volume(&component);
                if (volume < 0.0) != inside && volume != 0.0 {
                    for &f in &component {
                        if self.flip_face(f).is_ok() {
                            *flipped.entry(f).or_default() ^= true;
                        }
                    }
                }
            }
        }

        flipped.values().filter(|&&f| f).count()
    }
}
