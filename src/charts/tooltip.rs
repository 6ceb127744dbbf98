use smallvec::SmallVec;

use crate::charts::ChartTheme;
use crate::core::text::{estimate_text_width_px, line_height_px, wrap_text};
use crate::core::{Point, Viewport};
use crate::render::{
    Color, CornerRadii, FontWeight, FrameLayer, RectPrimitive, RenderFrame, TextHAlign,
    TextPrimitive, TextVAlign,
};

const PADDING_PX: f64 = 12.0;
const POINTER_OFFSET_PX: f64 = 10.0;
const CORNER_RADIUS_PX: f64 = 8.0;
const TITLE_GAP_PX: f64 = 8.0;
const LINE_GAP_PX: f64 = 4.0;
const SHADOW_OFFSET_PX: f64 = 4.0;

/// Visual role of one tooltip row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipLineKind {
    /// Bold heading row.
    Title,
    /// `label` in regular weight followed by a bold `value`.
    Field,
    /// Italic remark, e.g. a relative-cost comparison.
    Note,
    /// Wrapped body text.
    Detail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLine {
    pub kind: TooltipLineKind,
    pub label: String,
    pub value: Option<String>,
    pub color: Color,
    pub font_size_px: f64,
}

impl TooltipLine {
    #[must_use]
    pub fn title(text: impl Into<String>, color: Color, font_size_px: f64) -> Self {
        Self {
            kind: TooltipLineKind::Title,
            label: text.into(),
            value: None,
            color,
            font_size_px,
        }
    }

    #[must_use]
    pub fn field(label: impl Into<String>, value: impl Into<String>, color: Color) -> Self {
        Self {
            kind: TooltipLineKind::Field,
            label: label.into(),
            value: Some(value.into()),
            color,
            font_size_px: 13.0,
        }
    }

    #[must_use]
    pub fn note(text: impl Into<String>, color: Color) -> Self {
        Self {
            kind: TooltipLineKind::Note,
            label: text.into(),
            value: None,
            color,
            font_size_px: 12.0,
        }
    }

    #[must_use]
    pub fn detail(text: impl Into<String>, color: Color) -> Self {
        Self {
            kind: TooltipLineKind::Detail,
            label: text.into(),
            value: None,
            color,
            font_size_px: 12.0,
        }
    }

    /// Plain text as displayed, label and value joined.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.value {
            Some(value) => format!("{}{value}", self.label),
            None => self.label.clone(),
        }
    }

    fn label_weight(&self) -> FontWeight {
        match self.kind {
            TooltipLineKind::Title => FontWeight::Bold,
            _ => FontWeight::Normal,
        }
    }
}

/// Display fragment produced by a chart's tooltip function.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub border_color: Color,
    pub border_width: f64,
    pub min_width_px: f64,
    pub max_width_px: Option<f64>,
    pub lines: SmallVec<[TooltipLine; 5]>,
}

impl TooltipContent {
    #[must_use]
    pub fn new(border_color: Color, border_width: f64) -> Self {
        Self {
            border_color,
            border_width,
            min_width_px: 0.0,
            max_width_px: None,
            lines: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_min_width(mut self, min_width_px: f64) -> Self {
        self.min_width_px = min_width_px;
        self
    }

    #[must_use]
    pub fn with_max_width(mut self, max_width_px: f64) -> Self {
        self.max_width_px = Some(max_width_px);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: TooltipLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Displayed text of every row, top to bottom.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.lines.iter().map(TooltipLine::text).collect()
    }

    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text().contains(needle))
    }

    fn inner_max_width(&self) -> Option<f64> {
        self.max_width_px
            .map(|max| (max - 2.0 * PADDING_PX - 2.0 * self.border_width).max(1.0))
    }

    /// Rows after wrapping detail text to the box width.
    fn wrapped_rows(&self) -> Vec<(usize, String)> {
        let wrap_limit = self.inner_max_width();
        let mut rows = Vec::with_capacity(self.lines.len());
        for (index, line) in self.lines.iter().enumerate() {
            match (line.kind, wrap_limit) {
                (TooltipLineKind::Detail, Some(limit)) => {
                    for wrapped in wrap_text(&line.label, line.font_size_px, limit) {
                        rows.push((index, wrapped));
                    }
                }
                _ => rows.push((index, line.text())),
            }
        }
        rows
    }

    /// Box size including padding and border.
    #[must_use]
    pub fn measure(&self) -> (f64, f64) {
        let rows = self.wrapped_rows();
        let mut width: f64 = 0.0;
        let mut height = 0.0;
        for (position, (index, text)) in rows.iter().enumerate() {
            let line = &self.lines[*index];
            width = width.max(estimate_text_width_px(text, line.font_size_px));
            height += line_height_px(line.font_size_px);
            if position > 0 {
                height += if self.lines[rows[position - 1].0].kind == TooltipLineKind::Title {
                    TITLE_GAP_PX
                } else {
                    LINE_GAP_PX
                };
            }
        }
        let chrome = 2.0 * PADDING_PX + 2.0 * self.border_width;
        let mut box_width = (width + chrome).max(self.min_width_px);
        if let Some(max) = self.max_width_px {
            box_width = box_width.min(max);
        }
        (box_width, height + chrome)
    }

    /// Top-left corner next to the pointer, flipped to the other side when the
    /// box would leave the viewport.
    #[must_use]
    pub fn position(&self, pointer: Point, viewport: Viewport) -> Point {
        let (width, height) = self.measure();
        let view_width = f64::from(viewport.width);
        let view_height = f64::from(viewport.height);

        let mut x = pointer.x + POINTER_OFFSET_PX;
        if x + width > view_width {
            x = pointer.x - POINTER_OFFSET_PX - width;
        }
        let mut y = pointer.y + POINTER_OFFSET_PX;
        if y + height > view_height {
            y = pointer.y - POINTER_OFFSET_PX - height;
        }
        Point::new(x.max(0.0), y.max(0.0))
    }

    /// Draws the box and its rows on the tooltip layer.
    pub fn push_primitives(
        &self,
        frame: &mut RenderFrame,
        pointer: Point,
        theme: &ChartTheme,
    ) {
        let origin = self.position(pointer, frame.viewport);
        let (width, height) = self.measure();

        frame.push_rect(
            FrameLayer::Tooltip,
            RectPrimitive::new(
                origin.x,
                origin.y + SHADOW_OFFSET_PX,
                width,
                height,
                theme.tooltip_shadow,
            )
            .with_corner_radii(CornerRadii::uniform(CORNER_RADIUS_PX)),
        );
        frame.push_rect(
            FrameLayer::Tooltip,
            RectPrimitive::new(origin.x, origin.y, width, height, theme.tooltip_background)
                .with_border(self.border_width, self.border_color)
                .with_corner_radii(CornerRadii::uniform(CORNER_RADIUS_PX)),
        );

        let left = origin.x + self.border_width + PADDING_PX;
        let mut top = origin.y + self.border_width + PADDING_PX;
        let rows = self.wrapped_rows();
        for (position, (index, text)) in rows.iter().enumerate() {
            let line = &self.lines[*index];
            if position > 0 {
                top += if self.lines[rows[position - 1].0].kind == TooltipLineKind::Title {
                    TITLE_GAP_PX
                } else {
                    LINE_GAP_PX
                };
            }
            let center_y = top + line_height_px(line.font_size_px) * 0.5;

            match (&line.value, line.kind) {
                (Some(value), TooltipLineKind::Field) => {
                    frame.push_text(
                        FrameLayer::Tooltip,
                        TextPrimitive::new(
                            line.label.clone(),
                            left,
                            center_y,
                            line.font_size_px,
                            line.color,
                            TextHAlign::Left,
                        )
                        .with_v_align(TextVAlign::Middle),
                    );
                    let value_x = left + estimate_text_width_px(&line.label, line.font_size_px);
                    frame.push_text(
                        FrameLayer::Tooltip,
                        TextPrimitive::new(
                            value.clone(),
                            value_x,
                            center_y,
                            line.font_size_px,
                            line.color,
                            TextHAlign::Left,
                        )
                        .with_v_align(TextVAlign::Middle)
                        .with_weight(FontWeight::Bold),
                    );
                }
                _ => {
                    let mut primitive = TextPrimitive::new(
                        text.clone(),
                        left,
                        center_y,
                        line.font_size_px,
                        line.color,
                        TextHAlign::Left,
                    )
                    .with_v_align(TextVAlign::Middle)
                    .with_weight(line.label_weight());
                    if line.kind == TooltipLineKind::Note {
                        primitive = primitive.italic();
                    }
                    frame.push_text(FrameLayer::Tooltip, primitive);
                }
            }
            top += line_height_px(line.font_size_px);
        }
    }
}
