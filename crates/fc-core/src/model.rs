//! Core data model for flow diagrams.
//!
//! A diagram is an ordered list of [`Node`] blocks and an ordered list of
//! [`Edge`] connections between them, drawn on a canvas described by
//! [`CanvasSettings`]. A [`Project`] bundles all three into one persistable
//! record.
//!
//! Node payloads are a tagged union ([`NodeData`]): the `type` discriminant is
//! always explicit, never inferred from which fields happen to be present.
//! Partial payloads ([`NodePatch`], [`EdgePatch`], [`CanvasSettingsPatch`])
//! carry only the fields a caller wants to set; everything else keeps its
//! current value (or its default, when creating). Optional text fields
//! such as `icon` or an edge `label` are `Option<Option<_>>` in patches: an
//! absent key leaves the value alone and an explicit `null` clears it.

use crate::id::{EdgeId, NodeId};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a present key (including `null`) as `Some`, so a patch can
/// tell "clear this field" apart from "leave it".
fn clearable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point on the canvas, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `offset`.
    #[must_use]
    pub fn offset_by(self, offset: Position) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
        }
    }
}

// ─── Shared style enums ──────────────────────────────────────────────────

/// Stroke pattern for node borders and edge paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinePattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Drop shadow strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowLevel {
    #[default]
    None,
    Sm,
    Md,
    Lg,
}

// ─── Standard nodes ──────────────────────────────────────────────────────

/// Outline of a standard node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    #[default]
    Rounded,
    Rectangle,
    Circle,
    Diamond,
    Pill,
}

/// Idle animation played on a standard node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeAnimation {
    #[default]
    None,
    Pulse,
    Bounce,
    Glow,
}

/// Payload of a standard (icon + label) block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandardData {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon reference (an icon-set key or an emoji).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub shape: NodeShape,
    pub width: f64,
    pub height: f64,
    pub border_width: f64,
    pub border_style: LinePattern,
    pub shadow: ShadowLevel,
    pub animation: NodeAnimation,
    /// Seconds per animation cycle.
    pub animation_duration: f64,
    pub opacity: f64,
}

impl StandardData {
    pub const DEFAULT_WIDTH: f64 = 180.0;
    pub const DEFAULT_HEIGHT: f64 = 80.0;
    pub const DEFAULT_COLOR: &'static str = "#808080";
}

impl Default for StandardData {
    fn default() -> Self {
        Self {
            label: String::new(),
            description: None,
            icon: None,
            color: Self::DEFAULT_COLOR.to_string(),
            text_color: None,
            background_color: None,
            shape: NodeShape::Rounded,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            border_width: 1.0,
            border_style: LinePattern::Solid,
            shadow: ShadowLevel::Md,
            animation: NodeAnimation::None,
            animation_duration: 2.0,
            opacity: 1.0,
        }
    }
}

/// Partial payload for a standard node. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Option<String>>,
    #[serde(deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<NodeShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<LinePattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<NodeAnimation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl StandardPatch {
    /// Shorthand for a patch that only sets the label.
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }
}

impl StandardData {
    /// Merge `patch` into `self`, overwriting only `Some` fields.
    pub fn apply(&mut self, patch: &StandardPatch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(icon) = &patch.icon {
            self.icon = icon.clone();
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(text_color) = &patch.text_color {
            self.text_color = text_color.clone();
        }
        if let Some(background_color) = &patch.background_color {
            self.background_color = background_color.clone();
        }
        if let Some(shape) = patch.shape {
            self.shape = shape;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(border_width) = patch.border_width {
            self.border_width = border_width;
        }
        if let Some(border_style) = patch.border_style {
            self.border_style = border_style;
        }
        if let Some(shadow) = patch.shadow {
            self.shadow = shadow;
        }
        if let Some(animation) = patch.animation {
            self.animation = animation;
        }
        if let Some(duration) = patch.animation_duration {
            self.animation_duration = duration;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
    }
}

// ─── Header nodes ────────────────────────────────────────────────────────

/// Heading level of a header block. `H1` is a title, `H2`/`H3` subtitles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    #[default]
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Font size used when a header does not set one explicitly.
    pub fn default_font_size(self) -> f64 {
        match self {
            HeadingLevel::H1 => 28.0,
            HeadingLevel::H2 => 22.0,
            HeadingLevel::H3 => 18.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Medium,
    #[default]
    Semibold,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
    Mono,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Payload of a free-standing heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderData {
    pub text: String,
    pub level: HeadingLevel,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub font_family: FontFamily,
    pub color: String,
    pub alignment: TextAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub opacity: f64,
    pub shadow: ShadowLevel,
    pub width: f64,
}

impl Default for HeaderData {
    fn default() -> Self {
        Self {
            text: String::new(),
            level: HeadingLevel::H1,
            font_size: HeadingLevel::H1.default_font_size(),
            font_weight: FontWeight::Semibold,
            font_family: FontFamily::Sans,
            color: "#ffffff".to_string(),
            alignment: TextAlign::Left,
            background_color: None,
            opacity: 1.0,
            shadow: ShadowLevel::None,
            width: 320.0,
        }
    }
}

/// Partial payload for a header node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<HeadingLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlign>,
    #[serde(deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl HeaderData {
    /// Merge `patch` into `self`, overwriting only `Some` fields.
    pub fn apply(&mut self, patch: &HeaderPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(font_size) = patch.font_size {
            self.font_size = font_size;
        }
        if let Some(font_weight) = patch.font_weight {
            self.font_weight = font_weight;
        }
        if let Some(font_family) = patch.font_family {
            self.font_family = font_family;
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(alignment) = patch.alignment {
            self.alignment = alignment;
        }
        if let Some(background_color) = &patch.background_color {
            self.background_color = background_color.clone();
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(shadow) = patch.shadow {
            self.shadow = shadow;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// Discriminant of a node's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Standard,
    Header,
}

/// A node's payload, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeData {
    Standard(StandardData),
    Header(HeaderData),
}

/// A partial node payload, tagged by `type` like [`NodeData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodePatch {
    Standard(StandardPatch),
    Header(HeaderPatch),
}

impl NodePatch {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodePatch::Standard(_) => NodeKind::Standard,
            NodePatch::Header(_) => NodeKind::Header,
        }
    }
}

impl NodeData {
    /// Build a full payload from a partial one, filling unset fields with defaults.
    ///
    /// A header without an explicit font size takes the size of its level.
    pub fn from_patch(patch: &NodePatch) -> Self {
        match patch {
            NodePatch::Standard(p) => {
                let mut data = StandardData::default();
                data.apply(p);
                NodeData::Standard(data)
            }
            NodePatch::Header(p) => {
                let mut data = HeaderData::default();
                data.apply(p);
                if p.font_size.is_none() {
                    data.font_size = data.level.default_font_size();
                }
                NodeData::Header(data)
            }
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Standard(_) => NodeKind::Standard,
            NodeData::Header(_) => NodeKind::Header,
        }
    }

    /// Merge a partial payload. Returns `false` (and changes nothing) when
    /// the patch targets the other node kind.
    pub fn apply_patch(&mut self, patch: &NodePatch) -> bool {
        match (self, patch) {
            (NodeData::Standard(data), NodePatch::Standard(p)) => {
                data.apply(p);
                true
            }
            (NodeData::Header(data), NodePatch::Header(p)) => {
                data.apply(p);
                true
            }
            _ => false,
        }
    }

    /// Apply a resize. Headers only have a width.
    pub fn set_dimensions(&mut self, width: f64, height: f64) {
        match self {
            NodeData::Standard(data) => {
                data.width = width;
                data.height = height;
            }
            NodeData::Header(data) => data.width = width,
        }
    }
}

/// A single block on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Globally unique, never changes after creation.
    pub id: NodeId,
    pub position: Position,
    pub data: NodeData,
}

impl Node {
    pub fn new(id: NodeId, position: Position, data: NodeData) -> Self {
        Self { id, position, data }
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────

/// Visual payload of a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub animated: bool,
    pub color: String,
    pub thickness: f64,
    pub pattern: LinePattern,
    pub show_dot: bool,
    pub dot_count: u32,
    pub dot_size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_color: Option<String>,
    pub dot_spacing: f64,
    /// Seconds for one dot to travel the edge.
    pub animation_speed: f64,
    /// Bezier curvature, 0 = straight.
    pub curvature: f64,
    pub opacity: f64,
    pub start_arrow: bool,
    pub end_arrow: bool,
    pub bidirectional: bool,
    pub reverse_animation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
    pub shadow_blur: f64,
}

impl Default for EdgeData {
    fn default() -> Self {
        Self {
            label: None,
            animated: false,
            color: "#64748b".to_string(),
            thickness: 1.0,
            pattern: LinePattern::Solid,
            show_dot: true,
            dot_count: 1,
            dot_size: 4.0,
            dot_color: None,
            dot_spacing: 60.0,
            animation_speed: 2.0,
            curvature: 0.5,
            opacity: 1.0,
            start_arrow: false,
            end_arrow: true,
            bidirectional: false,
            reverse_animation: false,
            shadow_color: None,
            shadow_blur: 0.0,
        }
    }
}

/// Partial edge payload. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgePatch {
    #[serde(deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub label: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<LinePattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_dot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_size: Option<f64>,
    #[serde(deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub dot_color: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curvature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_arrow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_arrow: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bidirectional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_animation: Option<bool>,
    #[serde(deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<f64>,
}

impl EdgeData {
    /// Build a full payload from a partial one, filling unset fields with defaults.
    pub fn from_patch(patch: &EdgePatch) -> Self {
        let mut data = Self::default();
        data.apply(patch);
        data
    }

    /// Merge `patch` into `self`, overwriting only `Some` fields.
    pub fn apply(&mut self, patch: &EdgePatch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(animated) = patch.animated {
            self.animated = animated;
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(thickness) = patch.thickness {
            self.thickness = thickness;
        }
        if let Some(pattern) = patch.pattern {
            self.pattern = pattern;
        }
        if let Some(show_dot) = patch.show_dot {
            self.show_dot = show_dot;
        }
        if let Some(dot_count) = patch.dot_count {
            self.dot_count = dot_count;
        }
        if let Some(dot_size) = patch.dot_size {
            self.dot_size = dot_size;
        }
        if let Some(dot_color) = &patch.dot_color {
            self.dot_color = dot_color.clone();
        }
        if let Some(dot_spacing) = patch.dot_spacing {
            self.dot_spacing = dot_spacing;
        }
        if let Some(speed) = patch.animation_speed {
            self.animation_speed = speed;
        }
        if let Some(curvature) = patch.curvature {
            self.curvature = curvature;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity;
        }
        if let Some(start_arrow) = patch.start_arrow {
            self.start_arrow = start_arrow;
        }
        if let Some(end_arrow) = patch.end_arrow {
            self.end_arrow = end_arrow;
        }
        if let Some(bidirectional) = patch.bidirectional {
            self.bidirectional = bidirectional;
        }
        if let Some(reverse) = patch.reverse_animation {
            self.reverse_animation = reverse;
        }
        if let Some(shadow_color) = &patch.shadow_color {
            self.shadow_color = shadow_color.clone();
        }
        if let Some(blur) = patch.shadow_blur {
            self.shadow_blur = blur;
        }
    }
}

/// The result of a drag-to-connect gesture: which handles were joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Connection {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            source_handle: None,
            target_handle: None,
        }
    }
}

/// A directed connection between two nodes.
///
/// Several edges may join the same pair of nodes, and `source == target`
/// is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(default)]
    pub data: EdgeData,
}

impl Edge {
    pub fn new(id: EdgeId, connection: Connection, data: EdgeData) -> Self {
        Self {
            id,
            source: connection.source,
            target: connection.target,
            source_handle: connection.source_handle,
            target_handle: connection.target_handle,
            data,
        }
    }

    /// Whether this edge starts or ends at `node`.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

// ─── Canvas ──────────────────────────────────────────────────────────────

/// Pan/zoom state of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Persisted drawing-surface configuration. One per project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
    pub background: String,
    /// Persisted grid preference. Stored as `grid` in project records.
    #[serde(rename = "grid")]
    pub grid_enabled: bool,
    pub grid_size: f64,
    /// Absent from older records; treated as off.
    #[serde(default)]
    pub snap_to_grid: bool,
    #[serde(default)]
    pub viewport: Viewport,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            background: "#f8f8f8".to_string(),
            grid_enabled: true,
            grid_size: 20.0,
            snap_to_grid: false,
            viewport: Viewport::default(),
        }
    }
}

/// Partial canvas settings. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasSettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(rename = "grid", skip_serializing_if = "Option::is_none")]
    pub grid_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap_to_grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl CanvasSettings {
    pub fn apply(&mut self, patch: &CanvasSettingsPatch) {
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(background) = &patch.background {
            self.background = background.clone();
        }
        if let Some(grid) = patch.grid_enabled {
            self.grid_enabled = grid;
        }
        if let Some(size) = patch.grid_size {
            self.grid_size = size;
        }
        if let Some(snap) = patch.snap_to_grid {
            self.snap_to_grid = snap;
        }
        if let Some(viewport) = patch.viewport {
            self.viewport = viewport;
        }
    }
}

// ─── Project ─────────────────────────────────────────────────────────────

/// A persistable snapshot of a whole diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub updated_at: i64,
    /// Bumped on every assembled snapshot. No conflict detection.
    pub version: u64,
    pub canvas_settings: CanvasSettings,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}
