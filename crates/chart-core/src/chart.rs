// File: crates/chart-core/src/chart.rs
// Summary: Chart composer: owns hover state, rebuilds derived geometry, emits the render tree.

use tracing::{debug, trace};

use crate::axis::{Axis, MarkerLine};
use crate::error::Result;
use crate::format::TooltipFormat;
use crate::geometry::Point;
use crate::hover::{HoverConfig, HoverResolver};
use crate::path::LineGenerator;
use crate::render::{
    CellNode, CurveNode, CurveStyle, HighlightNode, MarkerLineNode, MarkerNode, RenderTree, TooltipNode,
};
use crate::scale::{build_scales, Scales};
use crate::series::{Dataset, Sample, SampleId, Series};
use crate::types::{Extent, Insets};

#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    pub extent: Extent,
    pub margin: Insets,
    pub hover: HoverConfig,
    pub tooltip: TooltipFormat,
    /// Radius of the circle drawn on the hovered sample.
    pub marker_radius: f64,
    pub marker_lines: Vec<MarkerLine>,
    /// Emit Voronoi cell outlines in the render tree (debug aid).
    pub voronoi_overlay: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            extent: Extent::default(),
            margin: Insets::default(),
            hover: HoverConfig::default(),
            tooltip: TooltipFormat::default(),
            marker_radius: 10.0,
            marker_lines: Vec::new(),
            voronoi_overlay: false,
        }
    }
}

/// Pointer input in surface pixels (margin included).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Leave,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
    #[default]
    Idle,
    Highlighted(SampleId),
}

impl HoverState {
    /// Next state for `event`. Pure: depends only on the event and the resolver.
    pub fn transition(self, event: PointerEvent, resolver: &HoverResolver, margin: &Insets) -> HoverState {
        match event {
            PointerEvent::Leave => HoverState::Idle,
            PointerEvent::Move { x, y } => {
                let inner = Point::new(x - margin.left as f64, y - margin.top as f64);
                resolver.find(inner).map_or(HoverState::Idle, HoverState::Highlighted)
            }
        }
    }

    pub fn sample(self) -> Option<SampleId> {
        match self {
            HoverState::Idle => None,
            HoverState::Highlighted(id) => Some(id),
        }
    }
}

/// Reported whenever an event or dataset swap changes the hover state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverChange {
    pub previous: HoverState,
    pub current: HoverState,
}

/// Geometry derived from (dataset, extent); rebuilt as a unit.
#[derive(Clone, Debug)]
struct Layout {
    scales: Scales,
    line: LineGenerator,
    resolver: HoverResolver,
}

impl Layout {
    fn build(dataset: &Dataset, options: &ChartOptions) -> Result<Self> {
        let scales = build_scales(dataset, options.extent, &options.margin)?;
        let line = LineGenerator::new(&scales);
        let resolver =
            HoverResolver::build(dataset, &line, scales.inner_width, scales.inner_height, &options.hover);
        Ok(Self { scales, line, resolver })
    }
}

type HoverListener = Box<dyn FnMut(Option<&Sample>)>;

pub struct Chart {
    dataset: Dataset,
    options: ChartOptions,
    layout: Layout,
    state: HoverState,
    on_hover: Option<HoverListener>,
}

impl Chart {
    /// Build scales, geometry and the hover resolver up front. Fails if the dataset has
    /// no samples or the margins leave no plot area.
    pub fn new(dataset: Dataset, options: ChartOptions) -> Result<Self> {
        let layout = Layout::build(&dataset, &options)?;
        Ok(Self { dataset, options, layout, state: HoverState::Idle, on_hover: None })
    }

    /// Register the hover notification; replaces any previous listener.
    pub fn set_on_hover(&mut self, listener: impl FnMut(Option<&Sample>) + 'static) {
        self.on_hover = Some(Box::new(listener));
    }

    pub fn dataset(&self) -> &Dataset { &self.dataset }
    pub fn options(&self) -> &ChartOptions { &self.options }
    pub fn scales(&self) -> &Scales { &self.layout.scales }
    pub fn line(&self) -> &LineGenerator { &self.layout.line }
    pub fn resolver(&self) -> &HoverResolver { &self.layout.resolver }
    pub fn state(&self) -> HoverState { self.state }

    pub fn highlighted(&self) -> Option<&Sample> {
        self.state.sample().and_then(|id| self.dataset.sample(id))
    }

    pub fn highlighted_series(&self) -> Option<&Series> {
        self.state.sample().and_then(|id| self.dataset.series().get(id.series))
    }

    /// Apply one pointer event. Returns the change, if any, after notifying the listener.
    pub fn handle_event(&mut self, event: PointerEvent) -> Option<HoverChange> {
        let next = self.state.transition(event, &self.layout.resolver, &self.options.margin);
        self.set_state(next)
    }

    /// Swap in a new dataset. Hover always resets to idle since sample ids are positional.
    /// On error the chart keeps its previous dataset and geometry.
    pub fn set_dataset(&mut self, dataset: Dataset) -> Result<Option<HoverChange>> {
        let layout = Layout::build(&dataset, &self.options)?;
        debug!(from = ?self.dataset.id(), to = ?dataset.id(), "dataset replaced");
        self.dataset = dataset;
        self.layout = layout;
        Ok(self.set_state(HoverState::Idle))
    }

    /// New surface size. The hovered sample survives; only its pixel position moves.
    pub fn resize(&mut self, extent: Extent) -> Result<()> {
        let options = ChartOptions { extent, ..self.options.clone() };
        self.layout = Layout::build(&self.dataset, &options)?;
        self.options = options;
        Ok(())
    }

    /// Time axis ticks for a collaborator drawing the bottom axis.
    pub fn x_axis(&self, label: &str, count: usize) -> Axis {
        Axis::time(label, &self.layout.scales.x, count, "%b %d")
    }

    /// Log axis ticks for a collaborator drawing the left axis.
    pub fn y_axis(&self, label: &str, count: usize) -> Axis {
        Axis::log(label, &self.layout.scales.y, count)
    }

    pub fn render(&self) -> RenderTree {
        let line = &self.layout.line;
        let scales = &self.layout.scales;

        let curve = |series: usize, s: &Series, style: CurveStyle| CurveNode {
            series,
            label: s.label.clone(),
            style,
            points: line.points(s),
            path: line.path_data(s),
        };

        let curves = self
            .dataset
            .series()
            .iter()
            .enumerate()
            .map(|(i, s)| curve(i, s, CurveStyle::Normal))
            .collect();

        let highlight = self.state.sample().and_then(|id| {
            let sample = self.dataset.sample(id)?;
            let series = self.dataset.series().get(id.series)?;
            let center = line.project(sample);
            Some(HighlightNode {
                sample: id,
                curve: curve(id.series, series, CurveStyle::Emphasized),
                marker: MarkerNode { center, radius: self.options.marker_radius },
                tooltip: TooltipNode { anchor: center, text: self.options.tooltip.text(sample) },
            })
        });

        let marker_lines = self
            .options
            .marker_lines
            .iter()
            .map(|m| MarkerLineNode { y: m.y(&scales.y), x1: 0.0, x2: scales.inner_width, label: m.label.clone() })
            .collect();

        let cells = if self.options.voronoi_overlay {
            self.layout
                .resolver
                .cells()
                .into_iter()
                .map(|(sample, polygon)| CellNode { sample, polygon })
                .collect()
        } else {
            Vec::new()
        };

        RenderTree {
            width: self.options.extent.width,
            height: self.options.extent.height,
            margin: self.options.margin,
            marker_lines,
            curves,
            highlight,
            cells,
        }
    }

    fn set_state(&mut self, next: HoverState) -> Option<HoverChange> {
        if next == self.state {
            return None;
        }
        let change = HoverChange { previous: self.state, current: next };
        self.state = next;
        trace!(?change, "hover changed");
        if let Some(listener) = self.on_hover.as_mut() {
            let sample = next.sample().and_then(|id| self.dataset.sample(id));
            listener(sample);
        }
        Some(change)
    }
}
