//! Serve command handler

use crate::config::settings::Settings;
use crate::logger::{HourlyFileWriter, LineLogger, init_logger};
use crate::server::Server;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Install logging, build the line logger and run the server
    ///
    /// # Errors
    /// - Log file setup errors under the `abort` policy
    /// - Server startup errors
    pub async fn execute(self) -> anyhow::Result<()> {
        let sink = init_logger(&self.config.logger)?;
        let line_logger = self.line_logger(sink);

        Server::new(self.config, line_logger).run().await
    }

    fn line_logger(&self, sink: Option<HourlyFileWriter>) -> LineLogger {
        LineLogger::new(self.config.mode)
            .with_format(self.config.logger.file.line_format)
            .with_sink(sink)
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
