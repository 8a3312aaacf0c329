//! Tool registration and lookup (C2 in the design doc this crate implements).

use std::collections::HashMap;

use tracing::warn;

use crate::schema::ArgSchema;
use crate::tool::Tool;

/// One tool's argument contract, as exported by [`ToolRegistry::schemas`].
#[derive(Debug, Clone)]
pub struct ToolSchema {
    /// Declared argument types.
    pub arg_schema: ArgSchema,
    /// Names that must be present for a call to this tool to be valid.
    pub required_args: Vec<String>,
}

/// Markdown catalog of one tool, used by [`ToolRegistry::describe_all`].
fn describe_tool(tool: &dyn Tool) -> String {
    let mut block = format!("### `{}`\n\n{}\n\n", tool.name(), tool.description());
    let schema = tool.arg_schema();
    if schema.is_empty() {
        block.push_str("Takes no arguments.\n");
        return block;
    }
    let required = tool.required_args();
    block.push_str("Arguments:\n");
    let mut names: Vec<&String> = schema.keys().collect();
    names.sort();
    for name in names {
        let marker = if required.contains(name) {
            "required"
        } else {
            "optional"
        };
        block.push_str(&format!("- `{name}` ({marker}): {:?}\n", schema[name]));
    }
    block
}

/// Enumerates built-in tools and any externally-discovered ones, exposing
/// lookup, schema export, and a markdown catalog for the system prompt.
#[derive(Default)]
pub struct ToolRegistry {
    builtins: HashMap<String, Box<dyn Tool>>,
    external: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built-in tool. If the name collides with an existing
    /// built-in, the existing registration is kept and the collision is logged.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.builtins.contains_key(&name) {
            warn!(tool = %name, "duplicate built-in tool registration ignored");
            return;
        }
        self.builtins.insert(name, tool);
    }

    /// Register an externally-discovered tool under `source`. A name
    /// collision with a built-in keeps the built-in and logs the collision;
    /// a collision among external sources is resolved by prefixing the
    /// name with `source`.
    pub fn register_external(&mut self, source: &str, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.builtins.contains_key(&name) {
            warn!(tool = %name, source, "external tool shadowed by built-in of the same name");
            return;
        }
        if self.external.contains_key(&name) {
            let prefixed = format!("{source}:{name}");
            warn!(tool = %name, source, prefixed = %prefixed, "external tool name collision, prefixing with source");
            self.external.insert(prefixed, tool);
            return;
        }
        self.external.insert(name, tool);
    }

    /// Look up a tool by its canonical (case-sensitive) name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.builtins
            .get(name)
            .or_else(|| self.external.get(name))
            .map(AsRef::as_ref)
    }

    /// All registered tool names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .builtins
            .keys()
            .chain(self.external.keys())
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Every registered tool's argument contract, keyed by name.
    #[must_use]
    pub fn schemas(&self) -> HashMap<String, ToolSchema> {
        self.names()
            .into_iter()
            .filter_map(|name| {
                let tool = self.get(&name)?;
                let schema = ToolSchema {
                    arg_schema: tool.arg_schema(),
                    required_args: tool.required_args(),
                };
                Some((name, schema))
            })
            .collect()
    }

    /// Markdown catalog of every registered tool, for the system prompt.
    #[must_use]
    pub fn describe_all(&self) -> String {
        let mut names = self.names();
        names.sort();
        names
            .into_iter()
            .filter_map(|name| self.get(&name).map(describe_tool))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
