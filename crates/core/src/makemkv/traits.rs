//! Trait definitions for the makemkv module.

use async_trait::async_trait;

use super::error::MakemkvError;
use super::runner::ToolOutput;

/// Something that can start `makemkvcon` with a command line.
///
/// Every call starts a fresh process; the returned [`ToolOutput`] owns it until
/// it is finished.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Returns the name of this runner implementation.
    fn name(&self) -> &str;

    /// Starts the tool with `args` and returns its output stream.
    async fn spawn(&self, args: Vec<String>) -> Result<ToolOutput, MakemkvError>;
}
