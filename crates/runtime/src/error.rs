use thiserror::Error;

use crate::model::ModelError;
use crate::pipeline::Stage;
use crate::prompt::PromptError;
use crate::tools::ToolError;

/// Errors that abort a turn.
///
/// Upstream service failures are not here: tools report them as data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("model call failed while {stage}: {source}")]
    Model {
        stage: Stage,
        #[source]
        source: ModelError,
    },

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

pub type Result<T> = std::result::Result<T, Error>;
