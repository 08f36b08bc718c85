//! Shared board state reachable from every viewport.

use crate::config::BoardConfig;
use crate::store::VectorStore;
use crate::tools::{ToolKind, ToolManager};
use kurbo::Rect;

/// The vectors on the board plus the tool that draws them.
///
/// Viewports share one `Board`; each keeps its own
/// [`Surface`](crate::surface::Surface) and router.
#[derive(Debug, Default)]
pub struct Board {
    pub store: VectorStore,
    pub tools: ToolManager,
    /// Board-space region the main viewport shows, outlined in the others.
    pub focus: Option<Rect>,
}

impl Board {
    pub fn new(tools: ToolManager) -> Self {
        Self {
            store: VectorStore::new(),
            tools,
            focus: None,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(ToolManager::new(config.default_tool, config.tool_settings()))
    }

    /// Switch tools, letting the old one commit or drop its pending work.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool, &mut self.store);
    }
}
