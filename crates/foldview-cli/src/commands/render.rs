//! Tree rendering CLI commands.

use std::collections::HashMap;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use foldview_auth::{DisplaySettings, RawAccessContext};
use foldview_core::error::{AppError, ErrorKind};
use foldview_core::types::{FolderId, RenderStrategy};
use foldview_entity::folder::{AccessLevel, PresentedNode};
use foldview_service::TreeService;
use foldview_store::MemoryTreeStore;

/// Arguments for `render`
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// JSON file describing the user's access context
    #[arg(short, long)]
    pub access: String,

    /// Hierarchy fixture (defaults to `store.fixture_path`)
    #[arg(long)]
    pub fixture: Option<String>,

    /// Render strategy (defaults to `tree.default_strategy`)
    #[arg(short, long)]
    pub strategy: Option<RenderStrategy>,

    /// Folder to expand with the lazy strategy
    #[arg(short, long, default_value_t = 0)]
    pub node: u64,

    /// Hide folders with no reachable content
    #[arg(long)]
    pub only_accessible: bool,

    /// Show item/descendant counters in badges
    #[arg(long)]
    pub counters: bool,
}

/// Arguments for `expand`
#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// Folder to expand (0 for the top level)
    pub node: u64,

    /// JSON file describing the user's access context
    #[arg(short, long)]
    pub access: String,

    /// Hierarchy fixture (defaults to `store.fixture_path`)
    #[arg(long)]
    pub fixture: Option<String>,
}

/// One presented folder as a table row.
#[derive(Debug, Serialize, Tabled)]
struct NodeRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Parent")]
    parent: u64,
    #[tabled(rename = "Folder")]
    label: String,
    #[tabled(rename = "Badge")]
    badge: String,
    #[tabled(rename = "Access")]
    access: &'static str,
    #[tabled(rename = "Title")]
    title: String,
}

/// Execute `render`
pub async fn execute(
    args: &RenderArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;
    if args.only_accessible {
        config.tree.show_only_accessible_folders = true;
    }
    if args.counters {
        config.tree.show_tree_counters = true;
    }
    let strategy = args.strategy.unwrap_or(config.tree.default_strategy);

    let fixture = args.fixture.as_deref().unwrap_or(&config.store.fixture_path);
    tracing::debug!(fixture, access = %args.access, strategy = %strategy, "Rendering tree");
    let store = MemoryTreeStore::load(fixture).await?;
    let settings = DisplaySettings::from(&config.tree);
    let ctx = read_access(&args.access).await?.into_context(settings);

    let service = TreeService::new(Arc::new(store), config.tree);
    let node_id = FolderId(args.node);
    let nodes = service.render(strategy, node_id, &ctx).await?;

    print_nodes(&nodes, node_id, format);
    Ok(())
}

/// Execute `expand`
pub async fn expand(
    args: &ExpandArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let render = RenderArgs {
        access: args.access.clone(),
        fixture: args.fixture.clone(),
        strategy: Some(RenderStrategy::Lazy),
        node: args.node,
        only_accessible: false,
        counters: false,
    };
    execute(&render, config_path, format).await
}

async fn read_access(path: &str) -> Result<RawAccessContext, AppError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Failed to read access context '{path}'"),
            e,
        )
    })?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_nodes(nodes: &[PresentedNode], anchor: FolderId, format: OutputFormat) {
    if format == OutputFormat::Json {
        output::print_json(nodes);
        return;
    }

    let mut depth: HashMap<FolderId, usize> = HashMap::with_capacity(nodes.len());
    let rows: Vec<NodeRow> = nodes
        .iter()
        .map(|node| {
            let indent = if node.parent_id == anchor || node.parent_id.is_root() {
                0
            } else {
                depth.get(&node.parent_id).map_or(0, |d| d + 1)
            };
            depth.insert(node.id, indent);
            NodeRow {
                id: node.id.get(),
                parent: node.parent_id.get(),
                label: format!("{}{}", "  ".repeat(indent), node.label),
                badge: node.badge.clone(),
                access: access_label(node.access),
                title: node.title.clone(),
            }
        })
        .collect();

    output::print_list(&rows, format);
}

fn access_label(access: AccessLevel) -> &'static str {
    match access {
        AccessLevel::Full => "full",
        AccessLevel::ReadOnly => "read-only",
        AccessLevel::Limited => "limited",
        AccessLevel::Blocked => "blocked",
    }
}
