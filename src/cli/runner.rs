//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, PageCommand};
use crate::config::{load_config, ClientConfig};
use crate::error::{Error, Result};
use crate::page::Page;
use crate::pagination::ItemStream;
use crate::wikipedia::Wikipedia;
use futures::StreamExt;
use serde::Serialize;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let wikipedia = self.build_client()?;

        match &self.cli.command {
            Commands::Languages => {
                for language in wikipedia.languages().await? {
                    self.output(&language);
                }
            }
            Commands::Search { query } => self.output_all(wikipedia.search(query).await?),
            Commands::Geosearch { lat, lon, radius } => {
                self.output_all(wikipedia.geosearch(*lat, *lon, *radius).await?);
            }
            Commands::Random { count } => self.output_all(wikipedia.random(*count).await?),
            Commands::Page { name, id, what } => {
                if name.is_empty() {
                    return Err(Error::parameter("name", "page name cannot be empty"));
                }
                let page = if *id {
                    wikipedia.page_from_id(name.as_str())
                } else {
                    wikipedia.page(name.as_str())
                };
                self.page(&page, what).await?;
            }
        }
        Ok(())
    }

    /// Build the client from the config file and flags
    fn build_client(&self) -> Result<Wikipedia> {
        let config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => ClientConfig::default(),
        };
        let mut wikipedia = Wikipedia::with_config(config)?;
        if let Some(language) = &self.cli.language {
            wikipedia.set_language(language.as_str())?;
        }
        debug!("Using endpoint {}", wikipedia.base_url());
        Ok(wikipedia)
    }

    async fn page(&self, page: &Page, what: &PageCommand) -> Result<()> {
        match what {
            PageCommand::Id => self.output(&page.id().await?),
            PageCommand::Title => self.output(&page.title().await?),
            PageCommand::Content => self.output(&page.content().await?),
            PageCommand::Html => self.output(&page.html_content().await?),
            PageCommand::Summary => self.output(&page.summary().await?),
            PageCommand::Sections => self.output_all(page.sections().await?),
            PageCommand::Section { heading } => {
                self.output(&page.section_content(heading).await?);
            }
            PageCommand::Images => self.drain(page.images()).await?,
            PageCommand::References => self.drain(page.references()).await?,
            PageCommand::Links => self.drain(page.links()).await?,
            PageCommand::Categories => self.drain(page.categories()).await?,
        }
        Ok(())
    }

    /// Print items as they arrive; the first error stops the command
    async fn drain<T: Serialize>(&self, mut stream: ItemStream<T>) -> Result<()> {
        let mut count = 0usize;
        while let Some(item) = stream.next().await {
            self.output(&item?);
            count += 1;
        }
        debug!("Printed {count} items");
        Ok(())
    }

    fn output_all<T: Serialize>(&self, items: Vec<T>) {
        for item in &items {
            self.output(item);
        }
    }

    /// Output one value
    fn output<T: Serialize + ?Sized>(&self, value: &T) {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value),
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
        };
        println!("{}", text.unwrap_or_default());
    }
}
