//! # Effect Handlers
//!
//! Each `Effect` becomes an async task that awaits the API and sends the
//! result back as an `Action`. Steps inside one handler run in order; separate
//! handlers may finish in any order.
//!
//! The dashboard fetches run concurrently inside one handler, and each sends
//! its own action as soon as it settles, so neither waits on the other.

use std::sync::Arc;
use std::sync::mpsc::Sender;

use log::{debug, info, warn};

use crate::api::CoinApi;
use crate::core::action::{Action, Effect};

fn dispatch(tx: &Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Failed to dispatch action: receiver dropped");
    }
}

/// Runs one effect to completion, dispatching the resulting actions.
pub async fn perform(effect: Effect, api: &dyn CoinApi, tx: &Sender<Action>) {
    match effect {
        Effect::QuerySession { seq, credentials } => {
            debug!("Querying session (seq={})", seq);
            let result = api.me(&credentials).await;
            dispatch(tx, Action::SessionQueried { seq, result });
        }
        Effect::SendSms { mobile } => {
            let result = api.sms(&mobile).await;
            dispatch(tx, Action::CodeSent(result));
        }
        Effect::VerifySms { mobile, code } => {
            let result = api.sms_auth(&mobile, code).await;
            dispatch(tx, Action::CodeVerified(result));
        }
        Effect::Register { credentials, name } => {
            let result = api.register(&credentials, &name).await;
            dispatch(tx, Action::Registered(result));
        }
        Effect::Unauth { credentials } => {
            // The outcome doesn't matter; the session is re-queried either way.
            if let Err(e) = api.unauth(&credentials).await {
                debug!("unauth returned an error: {}", e);
            }
            dispatch(tx, Action::LoggedOut);
        }
        Effect::LoadDashboard { seq, credentials } => {
            let coins = async {
                let result = api.my_coins(&credentials).await;
                dispatch(tx, Action::CoinsLoaded { seq, result });
            };
            let values = async {
                let result = api.my_values(&credentials).await;
                dispatch(tx, Action::ValuesLoaded { seq, result });
            };
            futures::join!(coins, values);
        }
        Effect::Quit => {}
    }
}

/// Spawns an effect on the tokio runtime.
pub fn spawn(effect: Effect, api: Arc<dyn CoinApi>, tx: Sender<Action>) {
    if effect == Effect::Quit {
        return;
    }
    info!("Spawning effect: {}", describe(&effect));
    tokio::spawn(async move {
        perform(effect, api.as_ref(), &tx).await;
    });
}

/// Log-safe summary (no tokens).
fn describe(effect: &Effect) -> &'static str {
    match effect {
        Effect::QuerySession { .. } => "query session",
        Effect::SendSms { .. } => "send sms",
        Effect::VerifySms { .. } => "verify sms",
        Effect::Register { .. } => "register",
        Effect::Unauth { .. } => "unauth",
        Effect::LoadDashboard { .. } => "load dashboard",
        Effect::Quit => "quit",
    }
}
