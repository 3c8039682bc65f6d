//! Two-stage tool pipeline.
//!
//! Each turn runs strictly in order:
//!
//! 1. **Selecting tool** — the system prompt and the user input go to the
//!    model, whose reply is parsed as a [`ToolSelection`].
//! 2. **Executing tool** — the selection runs through the [`Executor`].
//! 3. **Composing answer** — the tool output and the original input go back
//!    to the model, whose free-text reply is the answer.
//!
//! Nothing is carried from one turn to the next.

use std::future::Future;

use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use crate::debug::DebugLog;
use crate::model::{Backend, Message, ModelRequest};
use crate::prompt::{build_system_prompt, build_user_prompt, parse_selection};
use crate::tools::{Executor, ToolRegistry, ToolResult, ToolSelection};
use crate::{Error, Result};

/// Where a turn was when something happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SelectingTool,
    ExecutingTool,
    ComposingAnswer,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::SelectingTool => "selecting tool",
            Self::ExecutingTool => "executing tool",
            Self::ComposingAnswer => "composing answer",
        })
    }
}

/// Everything produced by one user turn.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub input: String,
    pub selection: ToolSelection,
    pub tool_output: ToolResult,
    pub final_reply: String,
}

/// Something that turns a line of user input into a reply.
pub trait Responder {
    fn respond(&self, input: &str) -> impl Future<Output = Result<String>>;
}

/// Tool-selecting chat pipeline over a model backend.
pub struct Pipeline<B> {
    backend: B,
    executor: Executor,
    system_prompt: String,
}

impl<B: Backend> Pipeline<B> {
    /// Create a pipeline. The system prompt is rendered once from `registry`.
    pub fn new(backend: B, registry: ToolRegistry, debug: DebugLog) -> Self {
        let system_prompt = build_system_prompt(&registry.describe_all());
        debug.log_text("SYSTEM_PROMPT", &system_prompt);

        Self {
            backend,
            executor: Executor::new(registry, debug),
            system_prompt,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Stage 1: ask the model which tool to run.
    pub async fn select_tool(&self, input: &str) -> Result<ToolSelection> {
        let messages = [Message::system(&self.system_prompt), Message::user(input)];
        let reply = self.complete(Stage::SelectingTool, &messages).await?;
        let selection = parse_selection(&reply)?;
        debug!(tool = selection.name.as_str(), "model selected tool");
        Ok(selection)
    }

    /// Run a selection through the executor.
    pub async fn execute(&self, selection: &ToolSelection) -> Result<ToolResult> {
        Ok(self.executor.execute(selection).await?)
    }

    /// Stage 2: ask the model to phrase an answer from the tool output.
    pub async fn compose_answer(&self, tool_output: &ToolResult, input: &str) -> Result<String> {
        let messages = [Message::user(build_user_prompt(tool_output, input))];
        self.complete(Stage::ComposingAnswer, &messages).await
    }

    /// Run one full turn.
    pub async fn run(&self, input: &str) -> Result<ConversationTurn> {
        let id = Uuid::new_v4();
        let span = info_span!("turn", %id);

        async move {
            let selection = self.select_tool(input).await?;
            debug!(stage = %Stage::ExecutingTool, "entering stage");
            let tool_output = self.execute(&selection).await?;
            let final_reply = self.compose_answer(&tool_output, input).await?;

            Ok(ConversationTurn {
                id,
                input: input.to_string(),
                selection,
                tool_output,
                final_reply,
            })
        }
        .instrument(span)
        .await
    }

    async fn complete(&self, stage: Stage, messages: &[Message]) -> Result<String> {
        debug!(%stage, "entering stage");
        let response = self
            .backend
            .call(ModelRequest { messages })
            .await
            .map_err(|source| Error::Model { stage, source })?;
        Ok(response.message.content)
    }
}

impl<B: Backend> Responder for Pipeline<B> {
    async fn respond(&self, input: &str) -> Result<String> {
        Ok(self.run(input).await?.final_reply)
    }
}
