//! Rendering options and configuration.

/// Placeholder emitted for inline objects (images, drawings).
pub const IMAGE_PLACEHOLDER: &str = "[IMAGE]";

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Text emitted in place of an inline object
    pub image_placeholder: String,

    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Render soft line breaks as Markdown hard breaks instead of spaces
    pub preserve_line_breaks: bool,

    /// Collect extraction statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inline object placeholder.
    pub fn with_image_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.image_placeholder = placeholder.into();
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable line break preservation.
    pub fn with_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Enable or disable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_placeholder: IMAGE_PLACEHOLDER.to_string(),
            max_heading_level: 6,
            preserve_line_breaks: true,
            collect_stats: false,
        }
    }
}
