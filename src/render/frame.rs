use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive,
    WedgePrimitive,
};

/// Paint order of primitive groups inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLayer {
    Background,
    Grid,
    Series,
    Labels,
    Overlay,
    /// Hover tooltips; always painted last.
    Tooltip,
}

/// Primitives of one paint layer, drawn in kind order: rects, wedges, paths,
/// lines, circles, then text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerPrimitives {
    pub rects: Vec<RectPrimitive>,
    pub wedges: Vec<WedgePrimitive>,
    pub paths: Vec<PathPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
            && self.wedges.is_empty()
            && self.paths.is_empty()
            && self.lines.is_empty()
            && self.circles.is_empty()
            && self.texts.is_empty()
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.rects.len()
            + self.wedges.len()
            + self.paths.len()
            + self.lines.len()
            + self.circles.len()
            + self.texts.len()
    }

    fn validate(&self) -> ChartResult<()> {
        for rect in &self.rects {
            rect.validate()?;
        }
        for wedge in &self.wedges {
            wedge.validate()?;
        }
        for path in &self.paths {
            path.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub layers: [LayerPrimitives; 6],
}

impl RenderFrame {
    pub const LAYER_ORDER: [FrameLayer; 6] = [
        FrameLayer::Background,
        FrameLayer::Grid,
        FrameLayer::Series,
        FrameLayer::Labels,
        FrameLayer::Overlay,
        FrameLayer::Tooltip,
    ];

    #[must_use]
    pub fn new(viewport: Viewport, background: Color) -> Self {
        Self {
            viewport,
            background,
            layers: Default::default(),
        }
    }

    #[must_use]
    pub fn layer(&self, layer: FrameLayer) -> &LayerPrimitives {
        &self.layers[layer as usize]
    }

    pub fn layer_mut(&mut self, layer: FrameLayer) -> &mut LayerPrimitives {
        &mut self.layers[layer as usize]
    }

    /// Layers paired with their kind, in paint order.
    pub fn iter_layers(&self) -> impl Iterator<Item = (FrameLayer, &LayerPrimitives)> {
        Self::LAYER_ORDER.into_iter().zip(self.layers.iter())
    }

    pub fn push_rect(&mut self, layer: FrameLayer, rect: RectPrimitive) {
        self.layer_mut(layer).rects.push(rect);
    }

    pub fn push_wedge(&mut self, layer: FrameLayer, wedge: WedgePrimitive) {
        self.layer_mut(layer).wedges.push(wedge);
    }

    pub fn push_path(&mut self, layer: FrameLayer, path: PathPrimitive) {
        self.layer_mut(layer).paths.push(path);
    }

    pub fn push_line(&mut self, layer: FrameLayer, line: LinePrimitive) {
        self.layer_mut(layer).lines.push(line);
    }

    pub fn push_circle(&mut self, layer: FrameLayer, circle: CirclePrimitive) {
        self.layer_mut(layer).circles.push(circle);
    }

    pub fn push_text(&mut self, layer: FrameLayer, text: TextPrimitive) {
        self.layer_mut(layer).texts.push(text);
    }

    /// All text primitives in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.layers.iter().flat_map(|layer| layer.texts.iter())
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.background.validate()?;
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(LayerPrimitives::is_empty)
    }

    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.layers.iter().map(LayerPrimitives::primitive_count).sum()
    }
}
