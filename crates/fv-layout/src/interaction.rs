//! Drag-to-reposition.
//!
//! Each node is either idle or being dragged. Dragging writes the node's pin
//! in the simulation; the simulation applies pins on its next tick. With
//! sticky mode on, a node stays pinned where it was dropped until released.

use std::collections::HashMap;

use fv_core::{NodeId, Vec2};

use crate::error::InteractionError;
use crate::simulation::Simulation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Per-node drag state machine.
#[derive(Debug, Default)]
pub struct DragController {
    dragging: HashMap<NodeId, Vec2>,
    sticky: bool,
}

impl DragController {
    pub fn new(sticky: bool) -> Self {
        Self {
            dragging: HashMap::new(),
            sticky,
        }
    }

    pub fn sticky(&self) -> bool {
        self.sticky
    }

    /// Toggle sticky mode. Existing pins are left alone.
    pub fn set_sticky(&mut self, sticky: bool) {
        self.sticky = sticky;
    }

    pub fn state(&self, node: NodeId) -> DragState {
        if self.dragging.contains_key(&node) {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    /// Nodes currently held by the pointer.
    pub fn dragging(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.dragging.keys().copied()
    }

    /// Idle -> Dragging: pin at the pointer and reheat.
    pub fn drag_start(
        &mut self,
        sim: &mut Simulation,
        node: NodeId,
        pointer: Vec2,
    ) -> Result<(), InteractionError> {
        if self.dragging.contains_key(&node) {
            return Err(InteractionError::AlreadyDragging(node));
        }
        sim.pin(node, pointer)?;
        sim.restart();
        self.dragging.insert(node, pointer);
        tracing::debug!(%node, "drag start");
        Ok(())
    }

    /// Dragging -> Dragging: move the pin.
    ///
    /// A simulation that cooled down during a long drag is reheated so the
    /// node keeps following the pointer.
    pub fn drag_move(
        &mut self,
        sim: &mut Simulation,
        node: NodeId,
        pointer: Vec2,
    ) -> Result<(), InteractionError> {
        let Some(last) = self.dragging.get_mut(&node) else {
            return Err(InteractionError::NotDragging(node));
        };
        sim.pin(node, pointer)?;
        *last = pointer;
        if sim.is_converged() {
            sim.restart();
        }
        Ok(())
    }

    /// Dragging -> Idle: unpin unless sticky. No reheat.
    pub fn drag_end(&mut self, sim: &mut Simulation, node: NodeId) -> Result<(), InteractionError> {
        if self.dragging.remove(&node).is_none() {
            return Err(InteractionError::NotDragging(node));
        }
        if !self.sticky {
            sim.unpin(node)?;
        }
        tracing::debug!(%node, sticky = self.sticky, "drag end");
        Ok(())
    }

    /// Drop a node's pin and any drag in progress on it.
    pub fn release(&mut self, sim: &mut Simulation, node: NodeId) -> Result<(), InteractionError> {
        sim.unpin(node)?;
        self.dragging.remove(&node);
        Ok(())
    }

    pub fn release_all(&mut self, sim: &mut Simulation) {
        self.dragging.clear();
        sim.clear_pins();
    }

    /// Forget all drag state, e.g. when the graph is replaced.
    pub fn reset(&mut self) {
        self.dragging.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use fv_core::vec2;

    fn sim() -> Simulation {
        Simulation::new(
            3,
            &[
                (NodeId::from_index(0), NodeId::from_index(1)),
                (NodeId::from_index(1), NodeId::from_index(2)),
            ],
            SimConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn drag_cycle_pins_then_unpins() {
        let mut sim = sim();
        let mut drag = DragController::new(false);
        let n = NodeId::from_index(1);

        drag.drag_start(&mut sim, n, vec2(10.0, 20.0)).unwrap();
        assert_eq!(drag.state(n), DragState::Dragging);
        assert_eq!(sim.alpha(), 0.3);
        sim.tick();
        assert_eq!(sim.position(n), Some(vec2(10.0, 20.0)));

        drag.drag_move(&mut sim, n, vec2(30.0, 40.0)).unwrap();
        sim.tick();
        assert_eq!(sim.position(n), Some(vec2(30.0, 40.0)));

        let alpha = sim.alpha();
        drag.drag_end(&mut sim, n).unwrap();
        assert_eq!(drag.state(n), DragState::Idle);
        assert_eq!(sim.pin_of(n), None);
        assert_eq!(sim.alpha(), alpha);
    }

    #[test]
    fn second_drag_start_rejected_without_effect() {
        let mut sim = sim();
        let mut drag = DragController::new(false);
        let n = NodeId::from_index(0);
        drag.drag_start(&mut sim, n, vec2(1.0, 1.0)).unwrap();
        sim.tick();
        let alpha = sim.alpha();

        let err = drag.drag_start(&mut sim, n, vec2(99.0, 99.0)).unwrap_err();
        assert_eq!(err, InteractionError::AlreadyDragging(n));
        assert_eq!(sim.pin_of(n), Some(vec2(1.0, 1.0)));
        assert_eq!(sim.alpha(), alpha);
    }

    #[test]
    fn sticky_pins_survive_drag_end() {
        let mut sim = sim();
        let mut drag = DragController::new(true);
        let n = NodeId::from_index(2);
        drag.drag_start(&mut sim, n, vec2(5.0, 5.0)).unwrap();
        drag.drag_end(&mut sim, n).unwrap();
        assert_eq!(sim.pin_of(n), Some(vec2(5.0, 5.0)));

        drag.release(&mut sim, n).unwrap();
        assert_eq!(sim.pin_of(n), None);
    }

    #[test]
    fn release_all_clears_everything() {
        let mut sim = sim();
        let mut drag = DragController::new(true);
        for i in 0..3 {
            drag.drag_start(&mut sim, NodeId::from_index(i), vec2(i as f64, 0.0))
                .unwrap();
        }
        drag.drag_end(&mut sim, NodeId::from_index(0)).unwrap();
        drag.release_all(&mut sim);
        assert_eq!(sim.pinned_count(), 0);
        assert_eq!(drag.dragging().count(), 0);
    }

    #[test]
    fn move_without_start_is_an_error() {
        let mut sim = sim();
        let mut drag = DragController::new(false);
        let n = NodeId::from_index(0);
        assert_eq!(
            drag.drag_move(&mut sim, n, vec2(0.0, 0.0)),
            Err(InteractionError::NotDragging(n))
        );
        assert_eq!(
            drag.drag_end(&mut sim, n),
            Err(InteractionError::NotDragging(n))
        );
    }

    #[test]
    fn unknown_node_propagates_sim_error() {
        let mut sim = sim();
        let mut drag = DragController::new(false);
        let err = drag
            .drag_start(&mut sim, NodeId::from_index(9), vec2(0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, InteractionError::Sim(_)));
        assert_eq!(drag.state(NodeId::from_index(9)), DragState::Idle);
    }
}
