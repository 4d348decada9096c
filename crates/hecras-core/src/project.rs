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

//! HEC-RAS project model.
//!
//! A project folder holds one `.prj` project file that lists its plan
//! (`pNN`), geometry (`gNN`), steady flow (`fNN`) and unsteady flow (`uNN`)
//! files by number. [`RasProject::open`] locates the project file, reads
//! every referenced file and exposes each category as a [`Table`].

use crate::error::{RasError, RasResult};
use crate::files::KeyValueFile;
use crate::table::Table;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// HEC-RAS version assumed when a caller does not name one.
pub const DEFAULT_RAS_VERSION: &str = "6.6";

const PROJECT_TITLE_KEY: &str = "Proj Title";

/// Category of a file referenced from the project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Plan,
    Geometry,
    SteadyFlow,
    UnsteadyFlow,
}

impl FileKind {
    pub const ALL: [FileKind; 4] = [
        FileKind::Plan,
        FileKind::Geometry,
        FileKind::SteadyFlow,
        FileKind::UnsteadyFlow,
    ];

    /// Key used in the project file, e.g. `Plan File=p01`.
    pub fn project_key(self) -> &'static str {
        match self {
            Self::Plan => "Plan File",
            Self::Geometry => "Geom File",
            Self::SteadyFlow => "Flow File",
            Self::UnsteadyFlow => "Unsteady File",
        }
    }

    /// Extension letter preceding the file number.
    pub fn prefix(self) -> char {
        match self {
            Self::Plan => 'p',
            Self::Geometry => 'g',
            Self::SteadyFlow => 'f',
            Self::UnsteadyFlow => 'u',
        }
    }

    /// Key holding the file's title.
    pub fn title_key(self) -> &'static str {
        match self {
            Self::Plan => "Plan Title",
            Self::Geometry => "Geom Title",
            Self::SteadyFlow | Self::UnsteadyFlow => "Flow Title",
        }
    }

    /// Name of the synthetic number column in tables.
    pub fn number_column(self) -> &'static str {
        match self {
            Self::Plan => "plan_number",
            Self::Geometry => "geom_number",
            Self::SteadyFlow => "flow_number",
            Self::UnsteadyFlow => "unsteady_number",
        }
    }

    fn compact_columns(self) -> &'static [&'static str] {
        match self {
            Self::Plan => &[
                "plan_number",
                "Plan Title",
                "Short Identifier",
                "Simulation Date",
                "Geom File",
                "Flow File",
            ],
            Self::Geometry => &["geom_number", "Geom Title", "Program Version"],
            Self::SteadyFlow => &["flow_number", "Flow Title", "Number of Profiles"],
            Self::UnsteadyFlow => &["unsteady_number", "Flow Title"],
        }
    }

    fn verbose_columns(self) -> &'static [&'static str] {
        match self {
            Self::Plan => &[
                "plan_number",
                "unsteady_number",
                "geometry_number",
                "Plan Title",
                "Program Version",
                "Short Identifier",
                "Simulation Date",
                "Computation Interval",
                "Output Interval",
                "Mapping Interval",
                "Run HTab",
                "Run UNet",
                "Run Sediment",
                "Run PostProcess",
                "Run WQNet",
                "Geom File",
                "Flow File",
                "HDF_Results_Path",
                "full_path",
            ],
            Self::Geometry => &[
                "geom_number",
                "Geom Title",
                "Program Version",
                "hdf_path",
                "full_path",
            ],
            Self::SteadyFlow => &[
                "flow_number",
                "Flow Title",
                "Program Version",
                "Number of Profiles",
                "Profile Names",
                "full_path",
            ],
            Self::UnsteadyFlow => &[
                "unsteady_number",
                "Flow Title",
                "Program Version",
                "Use Restart",
                "full_path",
            ],
        }
    }
}

/// A plan, geometry or flow file referenced from the project file.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub kind: FileKind,
    /// Two-digit file number, e.g. `"01"`.
    pub number: String,
    pub path: PathBuf,
    /// Parsed contents; `None` when the file is missing or unreadable.
    pub contents: Option<KeyValueFile>,
}

impl ProjectFile {
    fn load(kind: FileKind, number: String, path: PathBuf) -> Self {
        let contents = if path.is_file() {
            match KeyValueFile::read(&path) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!("Skipping unreadable {:?} file: {}", kind, e);
                    None
                }
            }
        } else {
            debug!("Referenced file missing: {}", path.display());
            None
        };

        Self {
            kind,
            number,
            path,
            contents,
        }
    }

    /// Value of `key` from the file contents.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.contents.as_ref().and_then(|c| c.get(key))
    }

    pub fn title(&self) -> Option<&str> {
        self.get(self.kind.title_key())
    }

    /// `Short Identifier` of a plan.
    pub fn short_id(&self) -> Option<&str> {
        self.get("Short Identifier")
    }

    /// Path of the HDF file written next to this file (`<name>.p01.hdf`).
    pub fn hdf_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".hdf");
        PathBuf::from(name)
    }

    /// Number of a file this plan points to, e.g. `Geom File=g02` → `"02"`.
    fn referenced_number(&self, key: &str, prefix: char) -> Option<&str> {
        self.get(key)?.strip_prefix(prefix)
    }

    fn cell(&self, column: &str) -> String {
        let value = match column {
            c if c == self.kind.number_column() => Some(self.number.clone()),
            "full_path" => Some(self.path.display().to_string()),
            "hdf_path" | "HDF_Results_Path" => {
                let hdf = self.hdf_path();
                hdf.is_file().then(|| hdf.display().to_string())
            }
            "geometry_number" => self.referenced_number("Geom File", 'g').map(str::to_string),
            "unsteady_number" => self.referenced_number("Flow File", 'u').map(str::to_string),
            key => self.get(key).map(str::to_string),
        };
        value.unwrap_or_default()
    }
}

/// A boundary condition defined in an unsteady flow file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boundary {
    pub unsteady_number: String,
    /// 1-based position within its unsteady file.
    pub number: usize,
    pub river: String,
    pub reach: String,
    pub river_station: String,
    pub downstream_river_station: String,
    pub storage_area: String,
    pub flow_area_2d: String,
    pub bc_line: String,
    pub bc_type: String,
    pub interval: String,
}

impl Boundary {
    /// Parse every `Boundary Location=` block of an unsteady flow file.
    pub fn parse_all(unsteady_number: &str, file: &KeyValueFile) -> Vec<Boundary> {
        let mut boundaries: Vec<Boundary> = Vec::new();

        for (key, value) in file.entries() {
            if key == "Boundary Location" {
                let fields: Vec<&str> = value.split(',').map(str::trim).collect();
                let field = |i: usize| fields.get(i).copied().unwrap_or_default().to_string();
                boundaries.push(Boundary {
                    unsteady_number: unsteady_number.to_string(),
                    number: boundaries.len() + 1,
                    river: field(0),
                    reach: field(1),
                    river_station: field(2),
                    downstream_river_station: field(3),
                    storage_area: field(4),
                    flow_area_2d: field(5),
                    bc_line: fields
                        .iter()
                        .skip(6)
                        .find(|f| !f.is_empty())
                        .map(|f| f.to_string())
                        .unwrap_or_default(),
                    bc_type: String::new(),
                    interval: String::new(),
                });
                continue;
            }

            let Some(current) = boundaries.last_mut() else {
                continue;
            };
            if key == "Interval" && current.interval.is_empty() {
                current.interval = value.clone();
            } else if current.bc_type.is_empty() {
                if let Some(bc_type) = boundary_type(key) {
                    current.bc_type = bc_type.to_string();
                }
            }
        }

        for boundary in &mut boundaries {
            if boundary.bc_type.is_empty() {
                boundary.bc_type = "Unknown".to_string();
            }
        }
        boundaries
    }
}

fn boundary_type(key: &str) -> Option<&'static str> {
    Some(match key {
        "Flow Hydrograph" => "Flow Hydrograph",
        "Stage Hydrograph" => "Stage Hydrograph",
        "Friction Slope" => "Normal Depth",
        "Lateral Inflow Hydrograph" => "Lateral Inflow Hydrograph",
        "Uniform Lateral Inflow Hydrograph" => "Uniform Lateral Inflow Hydrograph",
        "Rating Curve" => "Rating Curve",
        "Precipitation Hydrograph" => "Precipitation Hydrograph",
        "Gate Name" => "Gate Opening",
        _ => return None,
    })
}

/// An opened HEC-RAS project.
#[derive(Debug, Clone)]
pub struct RasProject {
    folder: PathBuf,
    name: String,
    project_file: KeyValueFile,
    ras_version: String,
    files: Vec<ProjectFile>,
}

impl RasProject {
    /// Open the project in `folder`.
    ///
    /// `ras_version` is the HEC-RAS release the caller targets; it is carried
    /// along for reporting only.
    pub fn open(folder: impl AsRef<Path>, ras_version: impl Into<String>) -> RasResult<Self> {
        let folder = folder.as_ref();
        if !folder.is_dir() {
            return Err(RasError::FolderNotFound(folder.to_path_buf()));
        }

        let prj_path = find_project_file(folder)?;
        let project_file = KeyValueFile::read(&prj_path)?;
        let name = prj_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!("Opening HEC-RAS project {} at {}", name, folder.display());

        let mut files = Vec::new();
        for kind in FileKind::ALL {
            for reference in project_file.get_all(kind.project_key()) {
                let Some(number) = reference.strip_prefix(kind.prefix()) else {
                    warn!("Ignoring malformed {}={}", kind.project_key(), reference);
                    continue;
                };
                let path = folder.join(format!("{}.{}", name, reference));
                files.push(ProjectFile::load(kind, number.to_string(), path));
            }
        }

        debug!("Loaded {} project files", files.len());

        Ok(Self {
            folder: folder.to_path_buf(),
            name,
            project_file,
            ras_version: ras_version.into(),
            files,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Project name, i.e. the `.prj` file stem.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prj_path(&self) -> &Path {
        self.project_file.path()
    }

    pub fn title(&self) -> Option<&str> {
        self.project_file.get(PROJECT_TITLE_KEY)
    }

    pub fn current_plan(&self) -> Option<&str> {
        self.project_file.get("Current Plan")
    }

    /// `English Units` or `SI Units`, when declared.
    pub fn units(&self) -> Option<&str> {
        self.project_file
            .flags()
            .iter()
            .map(String::as_str)
            .find(|f| f.ends_with("Units"))
    }

    pub fn ras_version(&self) -> &str {
        &self.ras_version
    }

    /// Files of one kind in project-file order.
    pub fn files(&self, kind: FileKind) -> impl Iterator<Item = &ProjectFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    pub fn plans(&self) -> impl Iterator<Item = &ProjectFile> {
        self.files(FileKind::Plan)
    }

    /// Find a plan by number (`"1"`, `"01"`, `"p01"`), title or short
    /// identifier. Title matching ignores ASCII case.
    pub fn find_plan(&self, selector: &str) -> RasResult<&ProjectFile> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(RasError::InvalidPlanSelector(selector.to_string()));
        }

        if let Some(number) = parse_plan_number(selector) {
            if let Some(plan) = self
                .plans()
                .find(|p| p.number.parse::<u32>().ok() == Some(number))
            {
                return Ok(plan);
            }
        }

        self.plans()
            .find(|p| {
                p.title().is_some_and(|t| t.eq_ignore_ascii_case(selector))
                    || p.short_id().is_some_and(|s| s.eq_ignore_ascii_case(selector))
            })
            .ok_or_else(|| RasError::PlanNotFound(selector.to_string()))
    }

    /// Table of one file kind. `verbose` adds every known column.
    pub fn table(&self, kind: FileKind, verbose: bool) -> Table {
        let columns = if verbose {
            kind.verbose_columns()
        } else {
            kind.compact_columns()
        };
        let mut table = Table::new(table_name(kind), columns.iter().copied());
        for file in self.files(kind) {
            table.push_row(columns.iter().map(|c| file.cell(c)));
        }
        table
    }

    pub fn plan_table(&self, verbose: bool) -> Table {
        self.table(FileKind::Plan, verbose)
    }

    pub fn geometry_table(&self, verbose: bool) -> Table {
        self.table(FileKind::Geometry, verbose)
    }

    pub fn flow_table(&self, verbose: bool) -> Table {
        self.table(FileKind::SteadyFlow, verbose)
    }

    pub fn unsteady_table(&self, verbose: bool) -> Table {
        self.table(FileKind::UnsteadyFlow, verbose)
    }

    /// Boundary conditions of every unsteady flow file.
    pub fn boundaries(&self) -> Vec<Boundary> {
        self.files(FileKind::UnsteadyFlow)
            .filter_map(|f| Some(Boundary::parse_all(&f.number, f.contents.as_ref()?)))
            .flatten()
            .collect()
    }

    pub fn boundaries_table(&self) -> Table {
        let mut table = Table::new(
            "BOUNDARY CONDITIONS",
            [
                "unsteady_number",
                "boundary_condition_number",
                "river",
                "reach",
                "river_station",
                "storage_area",
                "flow_area_2d",
                "bc_line",
                "bc_type",
                "interval",
            ],
        );
        for b in self.boundaries() {
            table.push_row([
                b.unsteady_number,
                b.number.to_string(),
                b.river,
                b.reach,
                b.river_station,
                b.storage_area,
                b.flow_area_2d,
                b.bc_line,
                b.bc_type,
                b.interval,
            ]);
        }
        table
    }
}

fn table_name(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Plan => "PLANS",
        FileKind::Geometry => "GEOMETRIES",
        FileKind::SteadyFlow => "STEADY FLOWS",
        FileKind::UnsteadyFlow => "UNSTEADY FLOWS",
    }
}

fn parse_plan_number(selector: &str) -> Option<u32> {
    let digits = selector
        .strip_prefix('p')
        .or_else(|| selector.strip_prefix('P'))
        .unwrap_or(selector);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Locate the project file: the first `.prj` in `folder` (by name) whose
/// first non-blank line is a `Proj Title=` entry. Other `.prj` files in a
/// project folder are usually GIS projection definitions.
fn find_project_file(folder: &Path) -> RasResult<PathBuf> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("prj"))
        })
        .collect();
    candidates.sort();

    for path in candidates {
        let bytes = std::fs::read(&path).map_err(|e| RasError::read(&path, e))?;
        let text = String::from_utf8_lossy(&bytes);
        let first = text.lines().map(str::trim).find(|l| !l.is_empty());
        if first.is_some_and(|l| l.starts_with(PROJECT_TITLE_KEY)) {
            return Ok(path);
        }
        debug!("Skipping non-project .prj file {}", path.display());
    }

    Err(RasError::ProjectFileNotFound(folder.to_path_buf()))
}
