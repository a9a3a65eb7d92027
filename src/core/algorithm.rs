use serde::Serialize;

pub const INPUT: &str = "INPUT";
pub const GEOID_GRID_FILE: &str = "GEOID_GRID_FILE";
pub const OVERWRITE: &str = "OVERWRITE";
pub const OUTPUT: &str = "OUTPUT";

pub const COMMAND_NAME: &str = "gdalwarp";

/// Extensions accepted for the geoid grid file.
pub const GEOID_GRID_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    RasterLayer,
    File,
    Boolean,
    RasterDestination,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterDefinition {
    pub key: &'static str,
    pub description: &'static str,
    pub kind: ParameterKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_filter: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub group: &'static str,
    pub group_id: &'static str,
    pub command_name: &'static str,
    pub parameters: Vec<ParameterDefinition>,
}

impl AlgorithmDescriptor {
    pub fn parameter(&self, key: &str) -> Option<&ParameterDefinition> {
        self.parameters.iter().find(|p| p.key == key)
    }
}

pub fn descriptor() -> AlgorithmDescriptor {
    AlgorithmDescriptor {
        name: "ConvertGNSSEllipsoidalHeightsToOrthometricHeights",
        display_name: "Convert GNSS ellipsoidal heights to orthometric heights",
        group: "Elevation Conversion",
        group_id: "elevationconversion",
        command_name: COMMAND_NAME,
        parameters: vec![
            ParameterDefinition {
                key: INPUT,
                description: "Input layer",
                kind: ParameterKind::RasterLayer,
                file_filter: None,
            },
            ParameterDefinition {
                key: GEOID_GRID_FILE,
                description: "Geoid Grid File",
                kind: ParameterKind::File,
                file_filter: Some("Grid File (*.tif *.tiff)"),
            },
            ParameterDefinition {
                key: OVERWRITE,
                description: "Overwrite Existing File?",
                kind: ParameterKind::Boolean,
                file_filter: None,
            },
            ParameterDefinition {
                key: OUTPUT,
                description: "Output Raster",
                kind: ParameterKind::RasterDestination,
                file_filter: None,
            },
        ],
    }
}
