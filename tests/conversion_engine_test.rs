use async_trait::async_trait;
use geoid_convert::core::{CommandExecutor, ExecutionOutput, ToolConfig};
use geoid_convert::{ConversionEngine, ConversionJob, GdalInfoProbe, GeoidError, Result, TomlConfig};
use std::sync::{Arc, Mutex};
use tokio_test::{assert_err, assert_ok};

const GDALINFO_JSON: &str = r#"{
  "description": "/survey/dem.tif",
  "driverShortName": "GTiff",
  "size": [1200, 800],
  "coordinateSystem": {"wkt": "GEOGCRS[\"WGS 84\"]"},
  "geoTransform": [-64.0, 0.125, 0.0, 45.0, 0.0, -0.125]
}"#;

/// Answers gdalinfo with canned JSON and gdalwarp with a fixed status.
#[derive(Clone)]
struct FakeGdal {
    warp_status: i32,
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl FakeGdal {
    fn new(warp_status: i32) -> Self {
        Self {
            warp_status,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn warp_calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(program, _)| program.ends_with("gdalwarp"))
            .map(|(_, args)| args.clone())
            .collect()
    }
}

#[async_trait]
impl CommandExecutor for FakeGdal {
    async fn execute(&self, program: &str, args: &[String]) -> Result<ExecutionOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        if program.ends_with("gdalinfo") {
            let readable = args.last().is_some_and(|s| s.starts_with("/survey/"));
            return Ok(if readable {
                ExecutionOutput {
                    status: Some(0),
                    stdout: GDALINFO_JSON.to_string(),
                    stderr: String::new(),
                }
            } else {
                ExecutionOutput {
                    status: Some(1),
                    stdout: String::new(),
                    stderr: "ERROR 4: No such file or directory".to_string(),
                }
            });
        }

        Ok(ExecutionOutput {
            status: Some(self.warp_status),
            stdout: "0...10...20...30...40...50...60...70...80...90...100 - done.\n".to_string(),
            stderr: if self.warp_status == 0 {
                String::new()
            } else {
                "ERROR 1: Cannot open geoid grid".to_string()
            },
        })
    }
}

fn engine(fake: &FakeGdal) -> ConversionEngine<FakeGdal, GdalInfoProbe<FakeGdal>> {
    ConversionEngine::new(fake.clone(), GdalInfoProbe::new(fake.clone()))
}

fn job(input: &str) -> ConversionJob {
    ConversionJob {
        input: input.to_string(),
        geoid_grid_file: "/grids/CGG2013n83.tif".to_string(),
        output: "/survey/dem_ortho.tif".to_string(),
        overwrite: false,
    }
}

#[tokio::test]
async fn test_end_to_end_with_probed_pixel_size() {
    let fake = FakeGdal::new(0);
    let report = assert_ok!(engine(&fake).run(&job("/survey/dem.tif")).await);

    assert!(report.executed);
    assert_eq!(report.input.width, Some(1200));
    assert!(report.command_line.contains("-tr 0.125 0.125"));

    let warps = fake.warp_calls();
    assert_eq!(warps.len(), 1);
    assert!(!warps[0].contains(&"-overwrite".to_string()));
    assert_eq!(warps[0][warps[0].len() - 2], "/survey/dem.tif");
}

#[tokio::test]
async fn test_unreadable_input_is_invalid_input() {
    let fake = FakeGdal::new(0);
    let err = assert_err!(engine(&fake).run(&job("/elsewhere/dem.tif")).await);

    assert!(matches!(
        err,
        GeoidError::InvalidInput { ref parameter } if parameter == "/elsewhere/dem.tif"
    ));
    assert!(fake.warp_calls().is_empty());
}

#[tokio::test]
async fn test_gdalwarp_failure_carries_stderr() {
    let fake = FakeGdal::new(1);
    let err = assert_err!(engine(&fake).run(&job("/survey/dem.tif")).await);

    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("Cannot open geoid grid"));
}

#[tokio::test]
async fn test_toml_jobs_run_in_dry_run_mode() {
    let toml_content = r#"
[options]
dry_run = true

[defaults]
geoid_grid_file = "/grids/CGG2013n83.tif"
overwrite = true

[[job]]
input = "/survey/dem.tif"
output = "/survey/a.tif"

[[job]]
input = "/survey/dem.tif"
output = "/survey/b.tif"
"#;
    let config = assert_ok!(TomlConfig::from_toml_str(toml_content));
    let jobs = assert_ok!(config.jobs());

    let fake = FakeGdal::new(0);
    let dry_engine = engine(&fake).with_dry_run(config.dry_run());
    let reports = assert_ok!(dry_engine.run_batch(&jobs).await);

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| !r.executed));
    assert!(reports[0].arguments.contains(&"-overwrite".to_string()));
    assert_eq!(reports[1].output, "/survey/b.tif");
    assert!(fake.warp_calls().is_empty());
}
