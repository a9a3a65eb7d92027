use crate::core::{CommandExecutor, RasterLayer, RasterProbe};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// The subset of `gdalinfo -json` output we read.
#[derive(Debug, Deserialize)]
struct GdalInfoReport {
    size: Option<[u64; 2]>,
    #[serde(rename = "geoTransform")]
    geo_transform: Option<[f64; 6]>,
}

/// Reads raster metadata by running `gdalinfo -json`.
pub struct GdalInfoProbe<E: CommandExecutor> {
    executor: E,
    program: String,
}

impl<E: CommandExecutor> GdalInfoProbe<E> {
    pub fn new(executor: E) -> Self {
        Self::with_program(executor, "gdalinfo")
    }

    pub fn with_program(executor: E, program: impl Into<String>) -> Self {
        Self {
            executor,
            program: program.into(),
        }
    }
}

#[async_trait]
impl<E: CommandExecutor> RasterProbe for GdalInfoProbe<E> {
    async fn probe(&self, source: &str) -> Result<Option<RasterLayer>> {
        let args = vec!["-json".to_string(), source.to_string()];
        let output = self.executor.execute(&self.program, &args).await?;

        if !output.success() || output.stdout.trim().is_empty() {
            tracing::debug!(
                "{} could not open {}: {}",
                self.program,
                source,
                output.stderr.trim()
            );
            return Ok(None);
        }

        let report: GdalInfoReport = serde_json::from_str(&output.stdout)?;
        Ok(Some(layer_from_report(source, report)))
    }
}

fn layer_from_report(source: &str, report: GdalInfoReport) -> RasterLayer {
    let (pixel_size_x, pixel_size_y) = match report.geo_transform {
        Some(gt) => (gt[1].abs(), gt[5].abs()),
        None => {
            // GDAL's default geotransform is the identity
            tracing::warn!("{} has no geotransform, assuming 1 unit per pixel", source);
            (1.0, 1.0)
        }
    };

    RasterLayer {
        source: source.to_string(),
        pixel_size_x,
        pixel_size_y,
        width: report.size.map(|s| s[0]),
        height: report.size.map(|s| s[1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExecutionOutput;
    use crate::utils::error::GeoidError;

    struct CannedExecutor(ExecutionOutput);

    #[async_trait]
    impl CommandExecutor for CannedExecutor {
        async fn execute(&self, program: &str, args: &[String]) -> Result<ExecutionOutput> {
            assert_eq!(program, "gdalinfo");
            assert_eq!(args[0], "-json");
            Ok(self.0.clone())
        }
    }

    fn canned(status: i32, stdout: &str) -> CannedExecutor {
        CannedExecutor(ExecutionOutput {
            status: Some(status),
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    #[tokio::test]
    async fn test_reads_pixel_size_from_geotransform() {
        let json = r#"{
            "description": "/in.tif",
            "driverShortName": "GTiff",
            "size": [3600, 1800],
            "geoTransform": [-180.0, 0.1, 0.0, 90.0, 0.0, -0.1]
        }"#;
        let probe = GdalInfoProbe::new(canned(0, json));

        let layer = probe.probe("/in.tif").await.unwrap().unwrap();

        assert_eq!(layer.source, "/in.tif");
        assert_eq!(layer.pixel_size_x, 0.1);
        assert_eq!(layer.pixel_size_y, 0.1);
        assert_eq!(layer.width, Some(3600));
        assert_eq!(layer.height, Some(1800));
    }

    #[tokio::test]
    async fn test_missing_geotransform_defaults_to_unit_pixels() {
        let probe = GdalInfoProbe::new(canned(0, r#"{"size": [10, 20]}"#));
        let layer = probe.probe("/raw.tif").await.unwrap().unwrap();
        assert_eq!((layer.pixel_size_x, layer.pixel_size_y), (1.0, 1.0));
    }

    #[tokio::test]
    async fn test_unreadable_raster_is_none() {
        let probe = GdalInfoProbe::new(canned(1, ""));
        assert!(probe.probe("/nope.tif").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_is_serialization_error() {
        let probe = GdalInfoProbe::new(canned(0, "not json"));
        let err = probe.probe("/in.tif").await.unwrap_err();
        assert!(matches!(err, GeoidError::SerializationError(_)));
    }
}
