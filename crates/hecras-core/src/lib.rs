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

//! HEC-RAS project readers and compute message formatting.
//!
//! This crate reads the plain-text files of a HEC-RAS project and turns them
//! into tables and text suitable for language models:
//!
//! - **Project model**: locate the `.prj` project file and read every plan,
//!   geometry, steady flow and unsteady flow file it references
//! - **Tables**: fixed-width text rendering with a row cap
//! - **Compute messages**: classify a plan's compute log into general
//!   messages, computation tasks and computation speeds, with a size bound
//! - **RAS Mapper**: projection file and map layers from `.rasmap`
//!
//! # Example
//!
//! ```no_run
//! use hecras_core::{format_compute_messages, read_compute_messages, FormatConfig, RasProject};
//!
//! let project = RasProject::open("/data/Muncie", "6.6")?;
//! println!("{}", project.plan_table(false));
//!
//! let plan = project.find_plan("01")?;
//! if let Some(log) = read_compute_messages(&project, plan)? {
//!     let text = format_compute_messages(&log.text, &log.source_label(), &FormatConfig::default());
//!     println!("{}", text);
//! }
//! # Ok::<(), hecras_core::RasError>(())
//! ```

pub mod compute_messages;
mod error;
pub mod files;
pub mod project;
pub mod rasmap;
pub mod results;
pub mod table;

pub use compute_messages::{format_compute_messages, FormatConfig};
pub use error::{RasError, RasResult};
pub use files::KeyValueFile;
pub use project::{Boundary, FileKind, ProjectFile, RasProject, DEFAULT_RAS_VERSION};
pub use rasmap::{MapLayer, RasMap};
pub use results::{read_compute_messages, ComputeLog, COMPUTE_MESSAGES_NOT_FOUND};
pub use table::{Table, DEFAULT_MAX_ROWS};
