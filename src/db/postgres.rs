//! Postgres-backed document store
//!
//! The pipeline writes each record as a JSONB `document` next to the few
//! columns the dashboard filters and orders on.

use backon::{ExponentialBuilder, Retryable};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls, Row};

use crate::db::store::AnalysisStore;
use crate::error::{DashboardError, Result};
use crate::models::{AIOutput, Analysis, Signal, SignalCategory, SignalStrength};

const ANALYSES: &str = "analyses";
const SIGNALS: &str = "signals";
const AI_OUTPUTS: &str = "ai_outputs";
const CONNECT_ATTEMPTS: usize = 5;

pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(database_url, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "Postgres connection error");
            }
        });

        let store = Self { client };
        store.init_schema().await?;
        Ok(store)
    }

    /// Connects with exponential backoff, giving up after a few attempts.
    pub async fn connect_with_retry(database_url: &str) -> Result<Self> {
        (|| Self::connect(database_url))
            .retry(ExponentialBuilder::default().with_max_times(CONNECT_ATTEMPTS))
            .notify(|err: &DashboardError, delay: Duration| {
                tracing::warn!(
                    error = %err,
                    retry_in_ms = delay.as_millis() as u64,
                    "Postgres connection failed, retrying"
                );
            })
            .await
    }

    async fn init_schema(&self) -> Result<()> {
        self.client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS analyses (
                    id TEXT PRIMARY KEY,
                    symbol TEXT NOT NULL,
                    timestamp TIMESTAMPTZ NOT NULL,
                    document JSONB NOT NULL
                );
                CREATE INDEX IF NOT EXISTS analyses_symbol_idx ON analyses (symbol, timestamp DESC);
                CREATE TABLE IF NOT EXISTS signals (
                    id TEXT PRIMARY KEY,
                    analysis_id TEXT NOT NULL,
                    symbol TEXT NOT NULL,
                    category TEXT NOT NULL,
                    strength TEXT NOT NULL,
                    confidence DOUBLE PRECISION NOT NULL,
                    document JSONB NOT NULL
                );
                CREATE INDEX IF NOT EXISTS signals_analysis_idx ON signals (analysis_id);
                CREATE TABLE IF NOT EXISTS ai_outputs (
                    id TEXT PRIMARY KEY,
                    document JSONB NOT NULL
                );",
            )
            .await?;
        Ok(())
    }

    async fn query_analyses(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Analysis>> {
        let rows = self.client.query(sql, params).await?;
        rows.iter().map(decode_analysis).collect()
    }

    async fn query_signals(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Signal>> {
        let rows = self.client.query(sql, params).await?;
        rows.iter().map(decode_signal).collect()
    }
}

fn row_id(row: &Row, collection: &'static str) -> Result<String> {
    row.try_get::<_, String>("id")
        .map_err(|e| DashboardError::malformed(collection, "<unknown>", e))
}

fn decode_document<T: DeserializeOwned>(
    row: &Row,
    collection: &'static str,
) -> Result<(String, T)> {
    let id = row_id(row, collection)?;
    let document: Value = row
        .try_get("document")
        .map_err(|e| DashboardError::malformed(collection, &id, e))?;
    let record = serde_json::from_value(document)
        .map_err(|e| DashboardError::malformed(collection, &id, e))?;
    Ok((id, record))
}

fn decode_analysis(row: &Row) -> Result<Analysis> {
    let (id, mut analysis): (String, Analysis) = decode_document(row, ANALYSES)?;
    analysis.id = id;
    Ok(analysis)
}

fn decode_signal(row: &Row) -> Result<Signal> {
    let (id, mut signal): (String, Signal) = decode_document(row, SIGNALS)?;
    signal.id = id;
    Ok(signal)
}

fn decode_ai_output(row: &Row) -> Result<AIOutput> {
    let (id, mut output): (String, AIOutput) = decode_document(row, AI_OUTPUTS)?;
    output.id = id;
    Ok(output)
}

#[async_trait::async_trait]
impl AnalysisStore for PostgresStore {
    async fn latest_by_symbol(&self, symbol: &str) -> Result<Option<Analysis>> {
        let symbol = symbol.trim().to_uppercase();
        let analyses = self
            .query_analyses(
                "SELECT id, document FROM analyses
                 WHERE symbol = $1
                 ORDER BY timestamp DESC
                 LIMIT 1",
                &[&symbol],
            )
            .await?;
        Ok(analyses.into_iter().next())
    }

    async fn analysis_by_id(&self, id: &str) -> Result<Option<Analysis>> {
        let analyses = self
            .query_analyses("SELECT id, document FROM analyses WHERE id = $1", &[&id])
            .await?;
        Ok(analyses.into_iter().next())
    }

    async fn list_analyses(&self) -> Result<Vec<Analysis>> {
        self.query_analyses("SELECT id, document FROM analyses ORDER BY timestamp DESC", &[])
            .await
    }

    async fn signals_by_analysis_id(&self, analysis_id: &str) -> Result<Vec<Signal>> {
        self.query_signals(
            "SELECT id, document FROM signals WHERE analysis_id = $1",
            &[&analysis_id],
        )
        .await
    }

    async fn signals_by_symbol(&self, symbol: &str) -> Result<Vec<Signal>> {
        let symbol = symbol.trim().to_uppercase();
        self.query_signals("SELECT id, document FROM signals WHERE symbol = $1", &[&symbol])
            .await
    }

    async fn signals_by_category(&self, category: SignalCategory) -> Result<Vec<Signal>> {
        self.query_signals(
            "SELECT id, document FROM signals WHERE category = $1",
            &[&category.as_str()],
        )
        .await
    }

    async fn bullish_signals(&self, limit: usize) -> Result<Vec<Signal>> {
        let limit = limit as i64;
        self.query_signals(
            "SELECT id, document FROM signals
             WHERE strength = $1
             ORDER BY confidence DESC
             LIMIT $2",
            &[&SignalStrength::Bullish.as_str(), &limit],
        )
        .await
    }

    async fn ai_output_by_analysis_id(&self, analysis_id: &str) -> Result<Option<AIOutput>> {
        let rows = self
            .client
            .query("SELECT id, document FROM ai_outputs WHERE id = $1", &[&analysis_id])
            .await?;
        rows.first().map(decode_ai_output).transpose()
    }
}
