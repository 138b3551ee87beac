use common::structs::{CurrencyPair, TickerSummary};
use glint_error::GlintError;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// Latest ticker per (exchange, pair), shared between polling tasks.
#[derive(Clone, Default)]
pub struct ExchangeInfoBoard {
    tickers: Arc<RwLock<HashMap<(String, String), TickerSummary>>>,
}

impl ExchangeInfoBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `summary` and returns the previous value for the same exchange and pair.
    pub fn update(
        &self,
        exchange: &str,
        pair: &CurrencyPair,
        summary: TickerSummary,
    ) -> Result<Option<TickerSummary>, GlintError> {
        let mut tickers = self.tickers.write().map_err(|error| {
            GlintError::new(
                String::from("Poisoned Lock"),
                format!("ExchangeInfoBoard::update -> {}", error),
            )
        })?;
        Ok(tickers.insert((exchange.to_string(), pair.to_string()), summary))
    }

    /// Every stored ticker, sorted by exchange then pair.
    pub fn snapshot(&self) -> Vec<(String, String, TickerSummary)> {
        let Ok(tickers) = self.tickers.read() else {
            return vec![];
        };
        let mut entries: Vec<(String, String, TickerSummary)> = tickers
            .iter()
            .map(|((exchange, pair), summary)| (exchange.clone(), pair.clone(), summary.clone()))
            .collect();
        entries.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
        entries
    }
}
