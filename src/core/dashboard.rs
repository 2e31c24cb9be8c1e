//! Dashboard data. The balances and values slices are filled by two
//! independent fetches; each result touches only its own slice.
//!
//! Every load carries a sequence number. Results from a superseded load
//! (an older reload, or anything issued before logout) are dropped.

use log::{debug, info, warn};

use crate::api::{CoinList, RequestResult, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub coin_list: CoinList,
    pub values: Vec<Value>,
    pub coins_loading: bool,
    pub values_loading: bool,
    /// Sequence number of the newest load.
    pub load_seq: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new load and returns its sequence number.
    pub fn begin_load(&mut self) -> u64 {
        self.load_seq += 1;
        self.coins_loading = true;
        self.values_loading = true;
        self.load_seq
    }

    /// Drops all data. Loads still in flight become stale.
    pub fn reset(&mut self) {
        *self = Self {
            load_seq: self.load_seq + 1,
            ..Self::default()
        };
    }

    fn is_current(&self, seq: u64, what: &str) -> bool {
        if seq != self.load_seq {
            info!(
                "Ignoring stale {} result (seq={}, current={})",
                what, seq, self.load_seq
            );
            return false;
        }
        true
    }

    /// On failure the previous balances stay. Returns the error message, if any.
    pub fn apply_coins(&mut self, seq: u64, result: RequestResult<CoinList>) -> Option<String> {
        if !self.is_current(seq, "balances") {
            return None;
        }
        self.coins_loading = false;
        match result {
            Ok(coin_list) => {
                debug!(
                    "Loaded {} holdings, balance {}",
                    coin_list.states.len(),
                    coin_list.balance
                );
                self.coin_list = coin_list;
                None
            }
            Err(error) => {
                warn!("Loading balances failed: {}", error);
                Some(format!("Balances: {}", error.user_message()))
            }
        }
    }

    pub fn apply_values(&mut self, seq: u64, result: RequestResult<Vec<Value>>) -> Option<String> {
        if !self.is_current(seq, "values") {
            return None;
        }
        self.values_loading = false;
        match result {
            Ok(values) => {
                debug!("Loaded {} values", values.len());
                self.values = values;
                None
            }
            Err(error) => {
                warn!("Loading values failed: {}", error);
                Some(format!("Values: {}", error.user_message()))
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.coins_loading || self.values_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coin_list, status_error};

    #[test]
    fn test_values_failure_does_not_touch_coins() {
        let mut dashboard = DashboardState::new();
        let seq = dashboard.begin_load();
        assert!(dashboard.apply_coins(seq, Ok(coin_list(3.0))).is_none());
        let err = dashboard.apply_values(seq, Err(status_error(500)));
        assert!(err.unwrap().starts_with("Values:"));
        assert_eq!(dashboard.coin_list, coin_list(3.0));
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn test_coins_failure_keeps_previous_balances() {
        let mut dashboard = DashboardState::new();
        let seq = dashboard.begin_load();
        dashboard.apply_coins(seq, Ok(coin_list(1.5)));
        dashboard.apply_coins(seq, Err(status_error(502)));
        assert_eq!(dashboard.coin_list.balance, 1.5);
    }

    #[test]
    fn test_older_load_cannot_overwrite_newer() {
        let mut dashboard = DashboardState::new();
        let first = dashboard.begin_load();
        let second = dashboard.begin_load();
        dashboard.apply_coins(second, Ok(coin_list(2.0)));
        dashboard.apply_coins(first, Ok(coin_list(1.0)));
        assert_eq!(dashboard.coin_list.balance, 2.0);
        assert!(!dashboard.coins_loading);
    }

    #[test]
    fn test_stale_result_leaves_loading_flag() {
        let mut dashboard = DashboardState::new();
        let first = dashboard.begin_load();
        dashboard.begin_load();
        assert!(dashboard.apply_values(first, Err(status_error(500))).is_none());
        assert!(dashboard.values_loading);
    }

    #[test]
    fn test_reset_makes_in_flight_loads_stale() {
        let mut dashboard = DashboardState::new();
        let seq = dashboard.begin_load();
        dashboard.reset();
        dashboard.apply_coins(seq, Ok(coin_list(99.0)));
        assert_eq!(dashboard.coin_list, CoinList::default());
        assert!(!dashboard.is_loading());

        // A fresh load after reset never reuses an old number
        assert!(dashboard.begin_load() > seq);
    }
}
