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

//! Shared HEC-RAS project fixtures for tests.
//!
//! Fixtures write a small project modelled on the HEC-RAS "Muncie" example
//! into a temporary directory that is removed when the fixture drops.
//!
//! ```rust
//! use hecras_test::ProjectFixture;
//!
//! let fixture = ProjectFixture::muncie();
//! assert!(fixture.path().join("Muncie.prj").is_file());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Project file. Plan 02 is deliberately not listed.
pub const MUNCIE_PRJ: &str = "Proj Title=Muncie
Current Plan=p03
Default Exp/Contr=0.3,0.1
English Units
Geom File=g01
Geom File=g02
Flow File=f01
Unsteady File=u01
Plan File=p01
Plan File=p03
Y Axis Title=Elevation
X Axis Title(PF)=Main Channel Distance
DSS Start Date=
DSS End Date=
";

pub const MUNCIE_P01: &str = "Plan Title=Steady Flow Run
Program Version=6.50
Short Identifier=Steady
Simulation Date=02JAN1900,0000,02JAN1900,2400
Geom File=g01
Flow File=f01
Run HTab= 1
Run UNet= 0
Run PostProcess= 1
";

pub const MUNCIE_P03: &str = "Plan Title=Unsteady Multi 9-SA run
Program Version=6.50
Short Identifier=9-SAs
Simulation Date=02JAN1900,0000,04JAN1900,0000
Geom File=g02
Flow File=u01
Computation Interval=15SEC
Output Interval=1HOUR
Mapping Interval=1HOUR
Run HTab= 1
Run UNet= 1
Run Sediment= 0
Run PostProcess= 1
Run WQNet= 0
";

pub const MUNCIE_G01: &str = "Geom Title=Muncie Geometry
Program Version=6.50
River Reach=White           ,Muncie
";

pub const MUNCIE_G02: &str = "Geom Title=Muncie Geometry - 9 SAs
Program Version=6.50
River Reach=White           ,Muncie
Storage Area=Pond 1          ,
";

pub const MUNCIE_F01: &str = "Flow Title=Steady Flows
Program Version=6.50
Number of Profiles= 3
Profile Names=PF 1,PF 2,PF 3
";

pub const MUNCIE_U01: &str = "Flow Title=Flow Hydrograph
Program Version=6.50
Use Restart= 0
Boundary Location=White           ,Muncie          ,15696.24,        ,                ,                ,                ,                                
Interval=1HOUR
Flow Hydrograph= 3
  1000  2500  1800
Stn Desc, Stn Elev=False
Boundary Location=White           ,Muncie          ,237.6455,        ,                ,                ,                ,                                
Friction Slope=0.0001,0
Boundary Location=                ,                ,        ,        ,Pond 1          ,                ,                ,                                
Interval=1DAY
";

/// Compute log of plan 03, tab separated.
pub const MUNCIE_P03_COMPUTE_MESSAGES: &str = "Plan: 'Unsteady Multi 9-SA run' (Muncie.p03)\r
Simulation started at: 04Mar2024 10:15:02 AM\r
\r
Writing Plan GIS Data...\r
Computation Task\tGeometry\t00:00:01\r
Computation Task\tUnsteady Flow Computations\t00:00:09\r
Computation Speed\tUnsteady Flow Computations\t9553x\r
Finished Unsteady Flow Simulation\r
";

/// GIS projection file. Shares the `.prj` extension with the project file.
pub const ALBERS_PRJ: &str = "PROJCS[\"USA_Contiguous_Albers_Equal_Area_Conic_USGS_version\",GEOGCS[\"GCS_North_American_1983\",DATUM[\"D_North_American_1983\",SPHEROID[\"GRS_1980\",6378137.0,298.257222101]],PRIMEM[\"Greenwich\",0.0],UNIT[\"Degree\",0.0174532925199433]],PROJECTION[\"Albers\"],UNIT[\"Foot_US\",0.3048006096012192]]";

pub const MUNCIE_RASMAP: &str = r#"<RASMapper>
  <Version>2.0.0</Version>
  <RASProjectionFilename Filename=".\Albers.prj" />
  <Geometries Checked="True" Expanded="True">
    <Layer Name="Muncie Geometry" Type="RASGeometry" Filename=".\Muncie.g01.hdf" />
  </Geometries>
  <Terrains Checked="True">
    <Layer Name="Terrain" Type="TerrainLayer" Filename=".\Terrain\Terrain.hdf" />
  </Terrains>
  <Units>US Survey Feet</Units>
</RASMapper>
"#;

/// A HEC-RAS project written to a temporary directory.
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    /// An empty folder.
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// The Muncie project: plans p01 (steady) and p03 (unsteady, with a
    /// compute log and an HDF results file), geometries g01 and g02, flows
    /// f01 and u01, a RAS Mapper file and its projection.
    pub fn muncie() -> Self {
        let fixture = Self::empty();
        fixture.write("Albers.prj", ALBERS_PRJ);
        fixture.write("Muncie.prj", MUNCIE_PRJ);
        fixture.write("Muncie.p01", MUNCIE_P01);
        fixture.write("Muncie.p03", MUNCIE_P03);
        fixture.write("Muncie.p03.hdf", "");
        fixture.write("Muncie.p03.computeMsgs.txt", MUNCIE_P03_COMPUTE_MESSAGES);
        fixture.write("Muncie.g01", MUNCIE_G01);
        fixture.write("Muncie.g02", MUNCIE_G02);
        fixture.write("Muncie.f01", MUNCIE_F01);
        fixture.write("Muncie.u01", MUNCIE_U01);
        fixture.write("Muncie.rasmap", MUNCIE_RASMAP);
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project folder, creating parents.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create fixture dir");
        }
        fs::write(&path, contents).expect("write fixture file");
        path
    }

    pub fn remove(&self, name: &str) {
        fs::remove_file(self.dir.path().join(name)).expect("remove fixture file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muncie_files() {
        let fixture = ProjectFixture::muncie();
        for name in ["Muncie.prj", "Muncie.p01", "Muncie.p03", "Muncie.u01", "Muncie.rasmap"] {
            assert!(fixture.path().join(name).is_file(), "{} missing", name);
        }
        assert!(!fixture.path().join("Muncie.p02").exists());
    }

    #[test]
    fn test_write_nested() {
        let fixture = ProjectFixture::empty();
        let path = fixture.write("Terrain/Terrain.vrt", "<VRTDataset/>");
        assert!(path.is_file());
        fixture.remove("Terrain/Terrain.vrt");
        assert!(!path.exists());
    }
}
