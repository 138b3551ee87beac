mod board;

use board::ExchangeInfoBoard;
use common::traits::exchange::ExchangeHandler;
use dotenv::dotenv;
use exchanges::{
    config::load_exchanges_configs,
    enums::{ExchangeId, ExchangeWrapper},
};
use futures_util::future::join_all;
use glint_error::GlintError;
use log::{debug, error, info, warn};
use tokio::{spawn, task::JoinHandle, time::sleep};

async fn poll_exchange(exchange: ExchangeWrapper, board: ExchangeInfoBoard) {
    let name = exchange.get_name().to_string();
    info!(
        "{} polling {} pairs every {:?}",
        name,
        exchange.get_pairs().len(),
        exchange.get_polling_delay()
    );
    info!(
        "{} withdrawals: {}",
        name,
        exchange.format_withdraw_permissions()
    );

    loop {
        for pair in exchange.get_pairs() {
            match exchange.fetch_ticker_summary(pair).await {
                Ok(summary) => {
                    let (last, volume) = (summary.last, summary.volume);
                    match board.update(&name, pair, summary) {
                        Ok(Some(previous)) => info!(
                            "{} {} last {} (was {}) volume {}",
                            name, pair, last, previous.last, volume
                        ),
                        Ok(None) => info!("{} {} last {} volume {}", name, pair, last, volume),
                        Err(error) => error!("{}", error),
                    }
                }
                Err(error) => warn!("{} {} ticker fetch failed: {}", name, pair, error),
            }
        }
        debug!("{} tickers on board", board.snapshot().len());
        sleep(exchange.get_polling_delay()).await;
    }
}

fn spawn_pollers(board: &ExchangeInfoBoard) -> Result<Vec<JoinHandle<()>>, GlintError> {
    let configs = load_exchanges_configs()?;
    let mut handles = vec![];

    for exchange_id in ExchangeId::all() {
        let Some(config) = configs.get(&exchange_id) else {
            continue;
        };
        let exchange = ExchangeWrapper::new(exchange_id, config)?;
        if !exchange.is_enabled() {
            info!("{} is disabled", exchange_id);
            continue;
        }
        handles.push(spawn(poll_exchange(exchange, board.clone())));
    }

    Ok(handles)
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let board = ExchangeInfoBoard::new();
    let handles = match spawn_pollers(&board) {
        Ok(handles) => handles,
        Err(error) => {
            error!("{}", error);
            return;
        }
    };

    if handles.is_empty() {
        warn!("no exchange is enabled");
        return;
    }

    for result in join_all(handles).await {
        if let Err(error) = result {
            error!("polling task stopped: {}", error);
        }
    }
}
