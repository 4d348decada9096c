// Dweve HEC-RAS MCP - HEC-RAS project query server
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! HEC-RAS MCP Server binary.
//!
//! # Usage
//!
//! ```bash
//! # Run with default settings (current directory as root)
//! hecras-mcp
//!
//! # Resolve relative project paths against a models folder, and refuse
//! # anything outside it
//! hecras-mcp --root /data/models --restrict-to-root
//!
//! # Run with debug logging
//! RUST_LOG=debug hecras-mcp
//! ```

use clap::Parser;
use hecras_mcp::{McpServer, McpServerConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hecras-mcp")]
#[command(author = "Dweve B.V.")]
#[command(version)]
#[command(about = "HEC-RAS Model Context Protocol (MCP) Server for AI/LLM integration")]
struct Cli {
    /// Root directory that relative project paths resolve against
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// HEC-RAS version assumed when a request does not name one
    #[arg(long, default_value = hecras_core::DEFAULT_RAS_VERSION)]
    ras_version: String,

    /// Output budget for compute messages, in tokens
    #[arg(long, default_value_t = hecras_core::compute_messages::DEFAULT_MAX_TOKENS)]
    max_output_tokens: usize,

    /// Rows shown per table before the middle is elided (0 shows all)
    #[arg(long, default_value_t = hecras_core::DEFAULT_MAX_ROWS)]
    max_table_rows: usize,

    /// Reject project folders outside the root directory
    #[arg(long)]
    restrict_to_root: bool,

    /// Use the synchronous stdio loop instead of the Tokio runtime
    #[arg(long)]
    sync: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hecras_mcp=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.max_output_tokens == 0 {
        return Err("--max-output-tokens must be greater than zero".into());
    }

    let config = McpServerConfig {
        root_path: cli.root.canonicalize().unwrap_or(cli.root),
        default_ras_version: cli.ras_version,
        max_output_tokens: cli.max_output_tokens,
        max_table_rows: cli.max_table_rows,
        restrict_to_root: cli.restrict_to_root,
        ..Default::default()
    };
    info!("Project root: {}", config.root_path.display());

    let mut server = McpServer::new(config);

    if cli.sync {
        server.run_stdio()?;
    } else {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async { server.run_stdio_async().await })?;
    }

    Ok(())
}
