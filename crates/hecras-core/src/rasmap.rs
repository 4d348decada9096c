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

//! RAS Mapper (`.rasmap`) files.
//!
//! The `.rasmap` XML names the projection file used by the project and lists
//! the map layers (geometries, terrains, results) shown in RAS Mapper.

use crate::error::{RasError, RasResult};
use crate::project::RasProject;
use crate::table::Table;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A layer listed in a `.rasmap` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLayer {
    pub name: String,
    pub layer_type: String,
    /// Layer file resolved against the project folder, if the layer has one.
    pub filename: Option<PathBuf>,
}

/// Parsed RAS Mapper file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasMap {
    pub path: PathBuf,
    /// Projection (`.prj`) file resolved against the project folder.
    pub projection: Option<PathBuf>,
    pub layers: Vec<MapLayer>,
}

impl RasMap {
    /// Load `<project>.rasmap`. `Ok(None)` when the project has none.
    pub fn load(project: &RasProject) -> RasResult<Option<Self>> {
        let path = project.folder().join(format!("{}.rasmap", project.name()));
        if !path.is_file() {
            debug!("No RAS Mapper file at {}", path.display());
            return Ok(None);
        }
        let bytes = std::fs::read(&path).map_err(|e| RasError::read(&path, e))?;
        Self::parse(&path, project.folder(), &String::from_utf8_lossy(&bytes)).map(Some)
    }

    /// Parse `.rasmap` XML; relative file references resolve against `base`.
    pub fn parse(path: impl Into<PathBuf>, base: &Path, xml: &str) -> RasResult<Self> {
        let path = path.into();
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut projection = None;
        let mut layers = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"RASProjectionFilename" => {
                        projection = attribute(&e, b"Filename").map(|f| resolve(base, &f));
                    }
                    b"Layer" => layers.push(MapLayer {
                        name: attribute(&e, b"Name").unwrap_or_default(),
                        layer_type: attribute(&e, b"Type").unwrap_or_default(),
                        filename: attribute(&e, b"Filename").map(|f| resolve(base, &f)),
                    }),
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(RasError::RasMap {
                        path,
                        message: format!("XML error at position {}: {}", reader.buffer_position(), e),
                    })
                }
                _ => {}
            }
        }

        Ok(Self {
            path,
            projection,
            layers,
        })
    }

    /// Contents of the projection file, usually WKT. `Ok(None)` when the
    /// file is not declared or does not exist.
    pub fn projection_wkt(&self) -> RasResult<Option<String>> {
        let Some(path) = self.projection.as_ref().filter(|p| p.is_file()) else {
            return Ok(None);
        };
        let bytes = std::fs::read(path).map_err(|e| RasError::read(path, e))?;
        Ok(Some(String::from_utf8_lossy(&bytes).trim().to_string()))
    }

    pub fn layers_table(&self) -> Table {
        let mut table = Table::new("RASMAP LAYERS", ["name", "type", "filename"]);
        for layer in &self.layers {
            table.push_row([
                layer.name.clone(),
                layer.layer_type.clone(),
                layer
                    .filename
                    .as_ref()
                    .map(|f| f.display().to_string())
                    .unwrap_or_default(),
            ]);
        }
        table
    }
}

fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// RAS Mapper stores Windows paths relative to the project, e.g.
/// `.\Terrain\Terrain.hdf`.
fn resolve(base: &Path, reference: &str) -> PathBuf {
    let normalized = reference.replace('\\', "/");
    let relative = normalized.strip_prefix("./").unwrap_or(&normalized);
    base.join(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RASMAP: &str = r#"<RASMapper>
  <Version>2.0.0</Version>
  <RASProjectionFilename Filename=".\GIS\Projection.prj" />
  <Geometries Checked="True">
    <Layer Name="Muncie" Type="RASGeometry" Filename=".\Muncie.g01.hdf" />
  </Geometries>
  <Terrains>
    <Layer Name="Terrain" Type="TerrainLayer" Filename=".\Terrain\Terrain.hdf">
      <ResampleMethod>near</ResampleMethod>
    </Layer>
  </Terrains>
</RASMapper>"#;

    #[test]
    fn test_parse_projection_and_layers() {
        let base = Path::new("/projects/muncie");
        let map = RasMap::parse("Muncie.rasmap", base, RASMAP).unwrap();

        assert_eq!(map.projection, Some(base.join("GIS/Projection.prj")));
        assert_eq!(map.layers.len(), 2);
        assert_eq!(map.layers[0].name, "Muncie");
        assert_eq!(map.layers[0].layer_type, "RASGeometry");
        assert_eq!(map.layers[1].filename, Some(base.join("Terrain/Terrain.hdf")));
    }

    #[test]
    fn test_parse_without_projection() {
        let map = RasMap::parse("a.rasmap", Path::new("/p"), "<RASMapper><Version>2.0.0</Version></RASMapper>").unwrap();
        assert!(map.projection.is_none());
        assert!(map.layers.is_empty());
        assert!(map.projection_wkt().unwrap().is_none());
    }

    #[test]
    fn test_parse_malformed() {
        let err = RasMap::parse("bad.rasmap", Path::new("/p"), "<RASMapper><Layer></Geometries>").unwrap_err();
        assert!(matches!(err, RasError::RasMap { .. }));
    }

    #[test]
    fn test_layers_table() {
        let map = RasMap::parse("Muncie.rasmap", Path::new("/p"), RASMAP).unwrap();
        let table = map.layers_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(1, "type"), Some("TerrainLayer"));
    }
}
