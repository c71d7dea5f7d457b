//! rag-config: inspect the configuration the RAG service would start with.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
