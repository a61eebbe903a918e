pub const DEFAULT_CONTAINER_ID: &str = "deso-widget-root";

/// Construction-time settings for a lookup widget.
///
/// `container_id` names the mount point the widget belongs to; it is carried
/// into every log line the session emits. When `auto_initialize` is `false`
/// the widget stays inert until it is explicitly initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub container_id: String,
    pub auto_initialize: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_owned(),
            auto_initialize: true,
        }
    }
}
