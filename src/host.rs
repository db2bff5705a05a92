//! Host boundary: owns the current simulation and rebuilds it on input changes
//!
//! A [`LayoutHost`] holds the dataset and the selected category, measure and
//! container size. Changing any of them discards the running simulation and
//! builds a new one under a fresh generation number. Frames and pointer
//! events carry the generation they belong to; anything from an older
//! generation is dropped.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::FieldConfig;
use crate::data::{Category, Dataset, Measure, ValueExtent};
use crate::layout::{BubbleLayout, LayoutError, NodeId, Point};
use crate::simulation::{
    Frame, HoverTracker, InteractionController, Simulation, TooltipDetail, TooltipEvent,
    TooltipPlacement,
};

/// What the host currently has to show
#[derive(Debug)]
pub enum HostState {
    /// No drawable area; nothing was packed
    Idle,
    /// Layout failed or had nothing to pack
    Empty { error: LayoutError },
    /// A simulation is running
    Ready { simulation: Box<Simulation> },
}

/// Pointer input from the UI, tagged with the generation it was issued for
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PointerEvent {
    DragStart { node: NodeId },
    DragMove { node: NodeId, x: f64, y: f64 },
    DragEnd { node: NodeId },
    Click,
    HoverEnter { node: NodeId, x: f64, y: f64 },
    HoverMove { x: f64, y: f64 },
    HoverLeave,
}

/// Owner of the rebuild lifecycle
#[derive(Debug)]
pub struct LayoutHost {
    dataset: Dataset,
    config: FieldConfig,
    category: Category,
    measure: Measure,
    width: f64,
    height: f64,
    generation: u64,
    state: HostState,
    interaction: InteractionController,
    hover: HoverTracker,
}

impl LayoutHost {
    /// Create a host with a zero-sized container; call [`resize`](Self::resize) to start
    pub fn new(dataset: Dataset, config: FieldConfig) -> Self {
        let interaction =
            InteractionController::new(config.interaction.clone(), config.simulation.reheat_target);
        let hover = HoverTracker::new(config.interaction.hover_close_delay());
        Self {
            dataset,
            config,
            category: Category::default(),
            measure: Measure::default(),
            width: 0.0,
            height: 0.0,
            generation: 0,
            state: HostState::Idle,
            interaction,
            hover,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn measure(&self) -> Measure {
        self.measure
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Generation of the current simulation; bumps on every rebuild
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> &HostState {
        &self.state
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn simulation(&self) -> Option<&Simulation> {
        match &self.state {
            HostState::Ready { simulation } => Some(&**simulation),
            _ => None,
        }
    }

    /// Error behind the `Empty` state, if any
    pub fn last_error(&self) -> Option<&LayoutError> {
        match &self.state {
            HostState::Empty { error } => Some(error),
            _ => None,
        }
    }

    /// Range of projected territory values for legend captions
    pub fn extent(&self) -> Option<ValueExtent> {
        self.simulation().and_then(|s| s.layout().extent)
    }

    pub fn set_category(&mut self, category: Category) {
        if category != self.category {
            self.category = category;
            self.rebuild();
        }
    }

    pub fn set_measure(&mut self, measure: Measure) {
        if measure != self.measure {
            self.measure = measure;
            self.rebuild();
        }
    }

    /// Change category and measure together with at most one rebuild
    pub fn set_selection(&mut self, category: Category, measure: Measure) {
        if category != self.category || measure != self.measure {
            self.category = category;
            self.measure = measure;
            self.rebuild();
        }
    }

    /// Report a new container size
    pub fn resize(&mut self, width: f64, height: f64) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.rebuild();
        }
    }

    /// Discard the running simulation and build a new one from the current inputs
    pub fn rebuild(&mut self) {
        self.generation += 1;
        self.interaction.reset();
        self.hover.invalidate();

        if !(self.width > 0.0 && self.height > 0.0) {
            debug!(
                generation = self.generation,
                width = self.width,
                height = self.height,
                "container has no area, skipping layout"
            );
            self.state = HostState::Idle;
            return;
        }

        self.state = match BubbleLayout::build(
            &self.dataset,
            self.category,
            self.measure,
            self.width,
            self.height,
            &self.config.layout,
        ) {
            Ok(layout) => {
                debug!(generation = self.generation, "simulation rebuilt");
                HostState::Ready {
                    simulation: Box::new(Simulation::new(layout, &self.config.simulation)),
                }
            }
            Err(error) if error.is_empty_layout() => {
                debug!(generation = self.generation, %error, "nothing to lay out");
                HostState::Empty { error }
            }
            Err(error) => {
                warn!(generation = self.generation, %error, "layout failed");
                HostState::Empty { error }
            }
        };
    }

    /// Advance the simulation one step and snapshot it
    pub fn tick(&mut self) -> Frame {
        if let HostState::Ready { simulation } = &mut self.state {
            simulation.step();
        }
        self.frame()
    }

    /// Snapshot without advancing
    pub fn frame(&self) -> Frame {
        match self.simulation() {
            Some(sim) => sim.frame(self.generation),
            None => Frame::empty(self.generation, self.width, self.height),
        }
    }

    /// Whether a frame belongs to the current generation
    pub fn accepts(&self, frame: &Frame) -> bool {
        let current = frame.generation == self.generation;
        if !current {
            trace!(
                frame = frame.generation,
                current = self.generation,
                "discarding stale frame"
            );
        }
        current
    }

    /// Dispatch a pointer event issued against `generation`
    pub fn handle(
        &mut self,
        generation: u64,
        event: PointerEvent,
        now: Duration,
    ) -> Option<TooltipEvent> {
        if generation != self.generation {
            debug!(
                event = generation,
                current = self.generation,
                "dropping event from a previous layout"
            );
            return None;
        }

        match event {
            PointerEvent::DragStart { node } => {
                self.drag_start(node);
                None
            }
            PointerEvent::DragMove { node, x, y } => {
                self.drag_move(node, x, y);
                None
            }
            PointerEvent::DragEnd { node } => {
                self.drag_end(node);
                None
            }
            PointerEvent::Click => {
                self.click();
                None
            }
            PointerEvent::HoverEnter { node, x, y } => self.hover_enter(node, x, y, now),
            PointerEvent::HoverMove { x, y } => self.hover_move(x, y),
            PointerEvent::HoverLeave => {
                self.hover_leave(now);
                None
            }
        }
    }

    fn parts(&mut self) -> Option<(&mut Simulation, &mut InteractionController)> {
        match &mut self.state {
            HostState::Ready { simulation } => Some((&mut **simulation, &mut self.interaction)),
            _ => None,
        }
    }

    pub fn drag_start(&mut self, node: NodeId) -> bool {
        self.parts()
            .is_some_and(|(sim, interaction)| interaction.drag_start(sim, node))
    }

    pub fn drag_move(&mut self, node: NodeId, x: f64, y: f64) -> bool {
        self.parts()
            .is_some_and(|(sim, interaction)| interaction.drag_move(sim, node, x, y))
    }

    pub fn drag_end(&mut self, node: NodeId) -> bool {
        self.parts()
            .is_some_and(|(sim, interaction)| interaction.drag_end(sim, node))
    }

    pub fn click(&mut self) {
        if let Some((sim, interaction)) = self.parts() {
            interaction.click(sim);
        }
    }

    /// Pointer entered a territory; returns the open event with its details
    pub fn hover_enter(
        &mut self,
        node: NodeId,
        x: f64,
        y: f64,
        _now: Duration,
    ) -> Option<TooltipEvent> {
        let sim = self.simulation()?;
        let layout = sim.layout();
        let territory = layout.territory_of(layout.packed.get(node)?)?;
        let detail = TooltipDetail::from_territory(territory);
        Some(self.hover.enter(node, detail, Point::new(x, y)))
    }

    pub fn hover_move(&mut self, x: f64, y: f64) -> Option<TooltipEvent> {
        self.hover.moved(Point::new(x, y))
    }

    pub fn hover_leave(&mut self, now: Duration) {
        self.hover.leave(now);
    }

    /// Deliver a pending tooltip close once its delay has passed
    pub fn poll_hover(&mut self, now: Duration) -> Option<TooltipEvent> {
        self.hover.poll(now)
    }

    /// Tooltip position for a `content` sized box at `pointer`
    pub fn place_tooltip(&self, pointer: Point, content: (f64, f64)) -> TooltipPlacement {
        TooltipPlacement::place(
            pointer,
            content,
            (self.width, self.height),
            self.config.interaction.tooltip_offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CategoryEntry, TerritoryRecord, YearValue};

    fn dataset() -> Dataset {
        let rec = |id: &str, region: &str, diff: f64| TerritoryRecord {
            territory_id: id.to_string(),
            territory_name: format!("Territory {}", id),
            region_id: region.to_string(),
            region_name: format!("Region {}", region),
            categories: vec![CategoryEntry {
                category: Category::FoodService.label().to_string(),
                diff,
                diff_percent: diff / 4.0,
                years: vec![
                    YearValue("2023".into(), 500.0),
                    YearValue("2024".into(), 500.0 + diff),
                ],
            }],
        };
        Dataset::new(vec![
            rec("a", "1", 100.0),
            rec("b", "2", -20.0),
            rec("c", "2", -20.0),
        ])
    }

    fn ready_host() -> LayoutHost {
        let mut host = LayoutHost::new(dataset(), FieldConfig::default());
        host.resize(800.0, 600.0);
        host
    }

    #[test]
    fn test_starts_idle() {
        let host = LayoutHost::new(dataset(), FieldConfig::default());
        assert!(matches!(host.state(), HostState::Idle));
        assert_eq!(host.generation(), 0);
        assert!(host.frame().is_empty());
    }

    #[test]
    fn test_resize_builds_simulation() {
        let host = ready_host();
        assert!(host.simulation().is_some());
        assert_eq!(host.generation(), 1);
        assert_eq!(host.extent(), Some(ValueExtent { min: 20.0, max: 100.0 }));
    }

    #[test]
    fn test_every_input_change_rebuilds() {
        let mut host = ready_host();
        host.resize(800.0, 600.0);
        assert_eq!(host.generation(), 1);
        host.set_measure(Measure::Percent);
        assert_eq!(host.generation(), 2);
        host.resize(1024.0, 600.0);
        assert_eq!(host.generation(), 3);
        host.set_selection(Category::FoodService, Measure::Percent);
        assert_eq!(host.generation(), 3);
        host.set_category(Category::Transport);
        assert_eq!(host.generation(), 4);
    }

    #[test]
    fn test_degenerate_container_is_idle() {
        let mut host = ready_host();
        host.resize(0.0, 600.0);
        assert!(matches!(host.state(), HostState::Idle));
        assert!(host.tick().is_empty());
    }

    #[test]
    fn test_missing_category_is_empty() {
        let mut host = ready_host();
        host.set_category(Category::Health);
        assert!(matches!(host.last_error(), Some(LayoutError::EmptyDataset)));
        assert!(host.tick().is_empty());
        assert_eq!(host.extent(), None);
    }

    #[test]
    fn test_stale_frames_rejected() {
        let mut host = ready_host();
        let old = host.tick();
        assert!(host.accepts(&old));
        host.set_measure(Measure::Percent);
        assert!(!host.accepts(&old));
        let fresh = host.tick();
        assert!(host.accepts(&fresh));
    }

    #[test]
    fn test_stale_events_dropped() {
        let mut host = ready_host();
        let stale = host.generation();
        let region = host.simulation().unwrap().nodes()[0].id;
        host.resize(900.0, 600.0);
        host.handle(stale, PointerEvent::DragStart { node: region }, Duration::ZERO);
        assert!(!host.simulation().unwrap().node(region).unwrap().is_pinned());

        let current = host.generation();
        host.handle(current, PointerEvent::DragStart { node: region }, Duration::ZERO);
        assert!(host.simulation().unwrap().node(region).unwrap().is_pinned());
    }

    #[test]
    fn test_hover_through_events() {
        let mut host = ready_host();
        let generation = host.generation();
        let leaf = host.simulation().unwrap().layout().find_territory("b").unwrap();

        let open = host.handle(
            generation,
            PointerEvent::HoverEnter { node: leaf, x: 10.0, y: 20.0 },
            Duration::from_millis(0),
        );
        match open {
            Some(TooltipEvent::Open { detail, pointer, .. }) => {
                assert_eq!(detail.territory_name, "Territory b");
                assert_eq!(detail.diff, -20.0);
                assert_eq!(pointer, Point::new(10.0, 20.0));
            }
            other => panic!("expected open event, got {:?}", other),
        }

        host.handle(generation, PointerEvent::HoverLeave, Duration::from_millis(100));
        assert_eq!(host.poll_hover(Duration::from_millis(900)), None);
        assert_eq!(host.poll_hover(Duration::from_millis(1100)), Some(TooltipEvent::Close));
    }

    #[test]
    fn test_hover_on_region_opens_nothing() {
        let mut host = ready_host();
        let region = host.simulation().unwrap().nodes()[0].id;
        assert_eq!(host.hover_enter(region, 0.0, 0.0, Duration::ZERO), None);
    }

    #[test]
    fn test_rebuild_closes_open_tooltip() {
        let mut host = ready_host();
        let leaf = host.simulation().unwrap().layout().find_territory("a").unwrap();
        host.hover_enter(leaf, 0.0, 0.0, Duration::ZERO);
        host.set_measure(Measure::Percent);
        assert_eq!(host.poll_hover(Duration::ZERO), Some(TooltipEvent::Close));
    }

    #[test]
    fn test_place_tooltip_uses_container() {
        let host = ready_host();
        let placement = host.place_tooltip(Point::new(790.0, 10.0), (100.0, 30.0));
        assert_eq!(placement.left, 682.0);
        assert_eq!(placement.top, 18.0);
    }
}
