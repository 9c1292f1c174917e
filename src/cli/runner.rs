//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{ClientConfig, Credentials};
use crate::endpoints::{DescriptorSearch, IndicatorSearch, UpdatesQuery};
use crate::error::{Error, Result};
use crate::http::ThreatExchangeClient;
use crate::pagination::Paginator;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = self.build_client()?;

        match &self.cli.command {
            Commands::Whoami => self.whoami(&client).await,
            Commands::Descriptors {
                text,
                descriptor_type,
                status,
                share_level,
                owner,
                tags,
                since,
                until,
                strict_text,
                fields,
                limit,
            } => {
                let mut search = DescriptorSearch::new()
                    .tags(tags.iter().cloned())
                    .fields(fields.iter().cloned())
                    .strict_text(*strict_text);
                search.text.clone_from(text);
                search.descriptor_type = descriptor_type.as_deref().map(Into::into);
                search.status = status.as_deref().map(Into::into);
                search.share_level = share_level.as_deref().map(Into::into);
                search.owner.clone_from(owner);
                search.since = *since;
                search.until = *until;
                search.limit = *limit;

                self.emit_all(client.descriptors().search(search)).await
            }
            Commands::Indicators {
                text,
                indicator_type,
                since,
                until,
                strict_text,
                limit,
            } => {
                let mut search = IndicatorSearch::new().strict_text(*strict_text);
                search.text.clone_from(text);
                search.indicator_type = indicator_type.as_deref().map(Into::into);
                search.since = *since;
                search.until = *until;
                search.limit = *limit;

                self.emit_all(client.indicators().search(search)).await
            }
            Commands::Tags { text, limit } => {
                self.emit_all(client.tags().search(text, *limit)).await
            }
            Commands::Members { limit } => {
                self.emit_all(client.members().list(&[], *limit)).await
            }
            Commands::Updates {
                privacy_group_id,
                since,
                until,
                types,
                limit,
            } => {
                let query = UpdatesQuery {
                    since: *since,
                    until: *until,
                    types: types.clone(),
                    fields: Vec::new(),
                    limit: *limit,
                };
                self.emit_all(client.updates().list(privacy_group_id, query))
                    .await
            }
        }
    }

    /// Build the client from flags, environment and the config file
    fn build_client(&self) -> Result<ThreatExchangeClient> {
        let token = self
            .cli
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::config(
                    "Access token not specified (use --access-token or THREATEXCHANGE_ACCESS_TOKEN)",
                )
            })?;

        let mut credentials = Credentials::new(token);
        if let Some(app_id) = &self.cli.app_id {
            credentials = credentials.with_app_id(app_id);
        }

        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_yaml_file(path)?,
            None => ClientConfig::default(),
        };
        if let Some(version) = &self.cli.api_version {
            config.api_version.clone_from(version);
        }

        ThreatExchangeClient::with_config(credentials, config)
    }

    async fn whoami(&self, client: &ThreatExchangeClient) -> Result<()> {
        let app = client.app().me().await?;
        let token = client.app().debug_token().await?;
        self.output_message(&json!({
            "app": app,
            "token": token.get("data").cloned().unwrap_or(token),
        }));
        Ok(())
    }

    /// Drain a paginator, writing each item as it arrives
    async fn emit_all<T: Serialize>(&self, mut items: Paginator<'_, T>) -> Result<()> {
        while let Some(item) = items.next().await? {
            self.output_message(&serde_json::to_value(&item)?);
        }
        info!(
            "Wrote {} records from {} pages",
            items.items_yielded(),
            items.pages_fetched()
        );
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
