use crate::core::{Pipeline, TransformResult};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// 一次執行的結果：輸出位置與統計內容
#[derive(Debug)]
pub struct RunOutcome {
    pub output_path: String,
    pub result: TransformResult,
}

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting report run");

        let table = self.pipeline.extract().await?;
        self.monitor.log_stats("Extract");

        let result = self.pipeline.transform(table).await?;
        self.monitor.log_stats("Transform");

        let output_path = self.pipeline.load(&result).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        tracing::info!("📁 Exports saved to: {}", output_path);
        Ok(RunOutcome {
            output_path,
            result,
        })
    }
}
