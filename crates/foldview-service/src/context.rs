//! Render request carrying the caller's access snapshot and traversal choice.

use foldview_auth::AccessContext;
use foldview_core::types::{FolderId, RenderStrategy};

/// One tree render as asked for by the surrounding request handler.
///
/// The access context has already been built from validated session data;
/// this layer never looks at credentials.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// The requesting user's grants.
    pub access: AccessContext,
    /// Folder to expand; ignored by the eager strategy.
    pub node_id: FolderId,
    /// Traversal strategy.
    pub strategy: RenderStrategy,
    /// Skip any cached render.
    pub force_refresh: bool,
}

impl RenderRequest {
    /// Request a render from the root with the given strategy.
    pub fn new(access: AccessContext, strategy: RenderStrategy) -> Self {
        Self {
            access,
            node_id: FolderId::ROOT,
            strategy,
            force_refresh: false,
        }
    }

    /// Expand a specific folder.
    pub fn with_node(mut self, node_id: FolderId) -> Self {
        self.node_id = node_id;
        self
    }

    /// Bypass the render cache.
    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    /// The folder this request actually renders from.
    ///
    /// Eager renders always start at the root.
    pub fn effective_node(&self) -> FolderId {
        match self.strategy {
            RenderStrategy::Eager => FolderId::ROOT,
            RenderStrategy::Lazy => self.node_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foldview_core::types::UserId;

    #[test]
    fn test_eager_always_renders_from_root() {
        let access = AccessContext::builder(UserId(1), "alice").build();
        let eager = RenderRequest::new(access.clone(), RenderStrategy::Eager).with_node(FolderId(4));
        assert_eq!(eager.effective_node(), FolderId::ROOT);

        let lazy = RenderRequest::new(access, RenderStrategy::Lazy).with_node(FolderId(4));
        assert_eq!(lazy.effective_node(), FolderId(4));
        assert!(!lazy.force_refresh);
    }
}
