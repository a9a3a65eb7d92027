use crate::core::builder::build_command;
use crate::core::{CommandExecutor, ConversionJob, RasterProbe, RunReport};
use crate::utils::error::{GeoidError, Result};
use chrono::Utc;

pub struct ConversionEngine<E: CommandExecutor, P: RasterProbe> {
    executor: E,
    probe: P,
    gdalwarp: String,
    dry_run: bool,
}

impl<E: CommandExecutor, P: RasterProbe> ConversionEngine<E, P> {
    pub fn new(executor: E, probe: P) -> Self {
        Self {
            executor,
            probe,
            gdalwarp: crate::core::algorithm::COMMAND_NAME.to_string(),
            dry_run: false,
        }
    }

    /// Runs a different gdalwarp binary than the one on `PATH`.
    pub fn with_gdalwarp(mut self, program: impl Into<String>) -> Self {
        self.gdalwarp = program.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self, job: &ConversionJob) -> Result<RunReport> {
        let started_at = Utc::now();
        tracing::info!("🛰️ Converting {} -> {}", job.input, job.output);

        let layer = self.probe.probe(&job.input).await?;
        match &layer {
            Some(layer) => tracing::debug!(
                "Input pixel size {} x {} ({:?} x {:?} pixels)",
                layer.pixel_size_x,
                layer.pixel_size_y,
                layer.width,
                layer.height
            ),
            None => tracing::warn!("Input {} could not be resolved to a raster", job.input),
        }

        let params = job.clone().into_parameters(layer);
        let command = build_command(&params)?;
        // build_command already rejected a missing input
        let input = params.input.clone().ok_or_else(|| GeoidError::InvalidInput {
            parameter: job.input.clone(),
        })?;

        let (_, command_line) = command.console_command();
        tracing::info!("🔧 {} {}", self.gdalwarp, command_line);

        let mut report = RunReport {
            program: self.gdalwarp.clone(),
            arguments: command.rendered_arguments(),
            command_line,
            input,
            output: params.output.clone(),
            executed: false,
            status: None,
            started_at,
            finished_at: started_at,
        };

        if self.dry_run {
            tracing::info!("🔍 Dry run, {} not executed", self.gdalwarp);
            report.finished_at = Utc::now();
            return Ok(report);
        }

        let output = self.executor.execute(&self.gdalwarp, &command.argv()).await?;
        for line in output.stdout.lines().filter(|l| !l.trim().is_empty()) {
            tracing::debug!("{}: {}", self.gdalwarp, line);
        }

        if !output.success() {
            tracing::error!("❌ {} failed with status {:?}", self.gdalwarp, output.status);
            return Err(GeoidError::ToolFailed {
                program: self.gdalwarp.clone(),
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            });
        }

        for line in output.stderr.lines().filter(|l| !l.trim().is_empty()) {
            tracing::warn!("{}: {}", self.gdalwarp, line);
        }

        report.executed = true;
        report.status = output.status;
        report.finished_at = Utc::now();
        tracing::info!("✅ Wrote {}", report.output);
        Ok(report)
    }

    /// Runs jobs in order and stops at the first failure.
    pub async fn run_batch(&self, jobs: &[ConversionJob]) -> Result<Vec<RunReport>> {
        let mut reports = Vec::with_capacity(jobs.len());
        for (index, job) in jobs.iter().enumerate() {
            tracing::info!("📦 Job {}/{}", index + 1, jobs.len());
            reports.push(self.run(job).await?);
        }
        Ok(reports)
    }
}
