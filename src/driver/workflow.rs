//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::adapter::auth::{create_bigquery_client, create_identity_credentials, ServiceAccountKey};
use crate::adapter::config::Config;
use crate::adapter::identity::client::IdentityToolkitClient;
use crate::adapter::repositories::bigquery_warehouse_repository::BigQueryWarehouseRepository;
use crate::adapter::repositories::identity_user_repository::IdentityUserRepository;
use crate::application::context::ExportContext;
use crate::application::dto::export_options::ExportOptions;
use crate::application::use_cases::manage_table::DeleteTableOutcome;
use crate::domain::entities::table_schema::{DATASET_ID, TABLE_ID};

use super::cli::{Args, Command};

/// Initializes the identity provider client from a service account key
pub fn configure_identity(context: &mut ExportContext, key: &ServiceAccountKey) -> Result<()> {
    let credentials = create_identity_credentials(key)?;
    let client = IdentityToolkitClient::new(credentials, key.project_id());
    context.set_identity(Arc::new(IdentityUserRepository::new(client)));
    info!("Configured identity client for project {}", key.project_id());
    Ok(())
}

/// Initializes the BigQuery client from a service account key
pub async fn configure_warehouse(
    context: &mut ExportContext,
    key: &ServiceAccountKey,
) -> Result<()> {
    let client = create_bigquery_client(key).await?;
    context.set_warehouse(Arc::new(BigQueryWarehouseRepository::new(
        client,
        key.project_id(),
    )));
    info!("Configured BigQuery client for project {}", key.project_id());
    Ok(())
}

/// Builds the export options for `command`, falling back to the config file
pub fn export_options(command: &Command, config: &Config) -> Option<ExportOptions> {
    match command {
        Command::Export {
            verbose,
            dry_run,
            max_concurrent_inserts,
        } => Some(ExportOptions::new(
            *verbose,
            *dry_run,
            max_concurrent_inserts.unwrap_or(config.max_concurrent_inserts),
        )),
        _ => None,
    }
}

/// Runs one command against an already configured context
pub async fn run_command(
    context: &ExportContext,
    command: &Command,
    config: &Config,
) -> Result<()> {
    match command {
        Command::CreateTable => {
            let outcome = context.create_table().await?;
            if outcome.dataset_created {
                println!("✓ Created dataset {}", DATASET_ID);
            }
            if outcome.table_created {
                println!("✓ Created table {}.{}", DATASET_ID, TABLE_ID);
            } else {
                println!("✓ Table {}.{} already exists", DATASET_ID, TABLE_ID);
            }
        }
        Command::DeleteTable => match context.delete_table().await? {
            DeleteTableOutcome::Deleted => {
                println!("✓ Deleted table {}.{}", DATASET_ID, TABLE_ID)
            }
            DeleteTableOutcome::DatasetNotFound => println!("Not found Dataset: {}", DATASET_ID),
            DeleteTableOutcome::TableNotFound => println!("Not found table: {}", TABLE_ID),
        },
        Command::Export { .. } => {
            let options = export_options(command, config).unwrap_or_default();
            let summary = context.export_users(&options).await?;
            println!(
                "✓ Exported {} users ({} rows inserted in {} batches)",
                summary.fetched_users, summary.inserted_rows, summary.batches
            );
        }
    }

    Ok(())
}

/// Auth Export Workflow
pub struct AuthExportWorkflow {
    config: Config,
}

impl AuthExportWorkflow {
    /// Create a new workflow instance with injected configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configure only the clients `command` needs
    pub async fn build_context(&self, command: &Command) -> Result<ExportContext> {
        let mut context = ExportContext::new();

        let warehouse_key = ServiceAccountKey::load(&self.config.warehouse_key_path)?;
        configure_warehouse(&mut context, &warehouse_key).await?;
        println!("✓ Using BigQuery project: {}", warehouse_key.project_id());

        if matches!(command, Command::Export { .. }) {
            let identity_key = ServiceAccountKey::load(&self.config.identity_key_path)?;
            configure_identity(&mut context, &identity_key)?;
            println!("✓ Using Firebase project: {}", identity_key.project_id());
        }

        Ok(context)
    }

    /// Execute the command given on the command line
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting authsync: {:?}", args.command);

        let context = self.build_context(&args.command).await?;
        run_command(&context, &args.command, &self.config).await
    }
}
