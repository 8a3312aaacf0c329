//! A facade over the retrieval/ingest pipeline, which lives outside the
//! core runtime's scope. Ingest is a write with externally-owned side
//! effects, so it is never cached or treated as parallel-safe.

use async_trait::async_trait;
use serde_json::{Map, Value};

use monologue_core::ToolResponse;

use crate::context::ToolContext;
use crate::error::{ToolError, ToolExecResult};
use crate::schema::{ArgSchema, ArgType};
use crate::tool::Tool;

/// Facade tool that hands a source off to the ingest pipeline.
pub struct KnowledgeImportTool;

#[async_trait]
impl Tool for KnowledgeImportTool {
    fn name(&self) -> &str {
        "knowledge_import"
    }

    fn description(&self) -> &str {
        "Queue a document or URL for ingestion into the knowledge base."
    }

    fn arg_schema(&self) -> ArgSchema {
        ArgSchema::from([("source".to_string(), ArgType::String)])
    }

    fn required_args(&self) -> Vec<String> {
        vec!["source".to_string()]
    }

    async fn execute(
        &self,
        args: &Map<String, Value>,
        _ctx: &ToolContext,
    ) -> ToolExecResult<ToolResponse> {
        let source = args
            .get("source")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing 'source'".to_string()))?;
        Ok(ToolResponse::message(format!(
            "[knowledge_import] queued {source:?} for ingestion"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn queues_source_for_ingestion() {
        let tool = KnowledgeImportTool;
        let ctx = ToolContext::new(std::env::temp_dir());
        let args = json!({"source": "https://example.com"})
            .as_object()
            .unwrap()
            .clone();
        let response = tool.execute(&args, &ctx).await.unwrap();
        assert!(response.message.contains("example.com"));
        assert!(!response.break_loop);
    }
}
