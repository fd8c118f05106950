//! The network view: lifecycle around one graph at a time.
//!
//! ```text
//! Idle --begin_loading--> Loading --load--> Running
//!   ^                                          |
//!   +----------------- teardown ---------------+
//! ```
//!
//! Loading a new graph tears the current simulation down first. After
//! teardown no further ticks run, whatever the clock does.

use fv_core::{NodeId, Vec2};
use fv_graph::{Graph, GraphPayload, HighlightSet};
use fv_layout::{DragController, FrameClock, SimConfig, Simulation};

use crate::error::{RenderError, RenderResult};
use crate::frame::{RenderStyle, Scene, draw_placeholder, draw_scene};
use crate::hit_test::node_at;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading,
    Running,
}

#[derive(Debug)]
struct Live {
    graph: Graph,
    sim: Simulation,
}

/// Owns the current graph, its simulation and the drag state.
#[derive(Debug)]
pub struct NetworkView {
    clock: FrameClock,
    sim_config: SimConfig,
    style: RenderStyle,
    state: ViewState,
    live: Option<Live>,
    drag: DragController,
    highlights: HighlightSet,
}

impl NetworkView {
    pub fn new(clock: &FrameClock, sim_config: SimConfig, style: RenderStyle) -> Self {
        Self {
            clock: clock.clone(),
            sim_config,
            style,
            state: ViewState::Idle,
            live: None,
            drag: DragController::default(),
            highlights: HighlightSet::new(),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut RenderStyle {
        &mut self.style
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.live.as_ref().map(|l| &l.graph)
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        self.live.as_ref().map(|l| &l.sim)
    }

    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    /// Drop the current graph and show the loading placeholder.
    pub fn begin_loading(&mut self) {
        self.stop_live();
        self.set_state(ViewState::Loading);
    }

    /// Replace the current graph. An empty graph shows the empty-state
    /// placeholder and starts no simulation.
    ///
    /// If no simulation can be built for the graph, the current graph keeps
    /// running; a view with nothing running falls back to idle.
    pub fn load(&mut self, graph: Graph) -> RenderResult<()> {
        if graph.is_empty() {
            self.stop_live();
            self.set_state(ViewState::Idle);
            return Ok(());
        }

        let mut sim = match Simulation::from_graph(&graph, self.sim_config.clone()) {
            Ok(sim) => sim,
            Err(e) => {
                if self.live.is_none() {
                    self.set_state(ViewState::Idle);
                }
                return Err(e.into());
            }
        };

        self.stop_live();
        self.set_state(ViewState::Loading);
        sim.attach(&self.clock);
        self.warn_unknown_highlights(&graph);
        tracing::debug!(
            nodes = graph.nodes().len(),
            edges = graph.edges().len(),
            "graph loaded"
        );
        self.live = Some(Live { graph, sim });
        self.set_state(ViewState::Running);
        Ok(())
    }

    /// Validate a payload and load it. On error the current graph stays.
    pub fn load_payload(&mut self, payload: &GraphPayload) -> RenderResult<()> {
        let graph = Graph::from_payload(payload)?;
        self.load(graph)
    }

    pub fn set_highlights(&mut self, highlights: HighlightSet) {
        self.highlights = highlights;
        if let Some(live) = &self.live {
            self.warn_unknown_highlights(&live.graph);
        }
    }

    fn warn_unknown_highlights(&self, graph: &Graph) {
        for (a, b) in self.highlights.unknown_pairs(graph) {
            tracing::warn!(a, b, "highlighted pair is not an edge of the graph");
        }
    }

    /// Handle all pending frames: one tick then one draw per frame.
    /// Returns the number of frames handled.
    pub fn on_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> RenderResult<usize> {
        let mut handled = 0;
        while let Some(live) = self.live.as_mut() {
            if live.sim.next_frame().is_none() {
                break;
            }
            handled += 1;
            self.draw(surface)?;
        }
        Ok(handled)
    }

    /// Run the ticks for all pending frames without drawing.
    pub fn advance(&mut self) -> usize {
        let Some(live) = self.live.as_mut() else {
            return 0;
        };
        std::iter::from_fn(|| live.sim.next_frame()).count()
    }

    /// Draw the current state.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> RenderResult<()> {
        let center = self.sim_config.canvas.center();
        match (&self.state, &self.live) {
            (ViewState::Running, Some(live)) => draw_scene(
                surface,
                &Scene {
                    graph: &live.graph,
                    positions: live.sim.positions(),
                    highlights: &self.highlights,
                },
                &self.style,
            ),
            (ViewState::Loading, _) => {
                draw_placeholder(surface, &self.style.loading_message, center, &self.style);
                Ok(())
            }
            _ => {
                draw_placeholder(surface, &self.style.empty_message, center, &self.style);
                Ok(())
            }
        }
    }

    pub fn node_at(&self, pointer: Vec2) -> Option<NodeId> {
        let live = self.live.as_ref()?;
        node_at(&live.graph, live.sim.positions(), pointer)
    }

    fn live_mut(&mut self) -> RenderResult<&mut Live> {
        self.live.as_mut().ok_or(RenderError::NotRunning)
    }

    pub fn drag_start(&mut self, node: NodeId, pointer: Vec2) -> RenderResult<()> {
        let live = self.live.as_mut().ok_or(RenderError::NotRunning)?;
        self.drag.drag_start(&mut live.sim, node, pointer)?;
        Ok(())
    }

    pub fn drag_move(&mut self, node: NodeId, pointer: Vec2) -> RenderResult<()> {
        let live = self.live.as_mut().ok_or(RenderError::NotRunning)?;
        self.drag.drag_move(&mut live.sim, node, pointer)?;
        Ok(())
    }

    pub fn drag_end(&mut self, node: NodeId) -> RenderResult<()> {
        let live = self.live.as_mut().ok_or(RenderError::NotRunning)?;
        self.drag.drag_end(&mut live.sim, node)?;
        Ok(())
    }

    pub fn sticky(&self) -> bool {
        self.drag.sticky()
    }

    pub fn set_sticky(&mut self, sticky: bool) {
        self.drag.set_sticky(sticky);
    }

    pub fn release(&mut self, node: NodeId) -> RenderResult<()> {
        let live = self.live.as_mut().ok_or(RenderError::NotRunning)?;
        self.drag.release(&mut live.sim, node)?;
        Ok(())
    }

    pub fn release_all(&mut self) {
        if let Some(live) = self.live.as_mut() {
            self.drag.release_all(&mut live.sim);
        }
    }

    /// Reheat the running simulation.
    pub fn reheat(&mut self) -> RenderResult<()> {
        self.live_mut()?.sim.restart();
        Ok(())
    }

    /// Stop the simulation and return to idle. Idempotent.
    pub fn teardown(&mut self) {
        self.stop_live();
        self.set_state(ViewState::Idle);
    }

    fn stop_live(&mut self) {
        if let Some(mut live) = self.live.take() {
            live.sim.stop();
        }
        self.drag.reset();
    }

    fn set_state(&mut self, next: ViewState) {
        if self.state != next {
            tracing::info!(from = ?self.state, to = ?next, "view state");
            self.state = next;
        }
    }
}

impl Drop for NetworkView {
    fn drop(&mut self) {
        self.stop_live();
    }
}
