//! Turing bombe cryptanalysis.
//!
//! Given a crib (a guessed plain text aligned against intercepted
//! cipher text) the bombe searches rotor settings for a hypothesis that
//! survives the electrical contradiction test, producing "stops" worth
//! trying by hand. One [`TuringBombe`] covers a single rotor order;
//! [`run_permutations`] fans a crib out over many orders.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};

use crate::error::EnigmaError;

mod engine;
mod logs;
mod menu;

pub use engine::{BombeStop, TuringBombe};
pub use logs::BombeLogs;
pub use menu::{Connection, Menu};

/// Runs the bombe over every rotor order in `permutations`, collecting
/// the stops from each. A `log_dir` attaches per-permutation stop and
/// register files. The returned cancel flag from [`cancel_handle`] can
/// end the sweep between positions.
///
/// # Errors
/// Fails on the first unparseable permutation or invalid crib; a run
/// that merely finds no stops is not an error.
pub fn run_permutations(
    plain_text: &str,
    cipher_text: &str,
    permutations: &[String],
    test_register: char,
    log_dir: Option<&Path>,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<Vec<BombeStop>, EnigmaError> {
    let cancel = cancel.unwrap_or_else(|| Arc::new(AtomicBool::new(false)));
    let mut stops = Vec::new();
    for permutation in permutations {
        if cancel.load(Ordering::Relaxed) {
            info!("bombe sweep cancelled before {permutation}");
            break;
        }
        let mut bombe = TuringBombe::new(plain_text, cipher_text, permutation, test_register)?;
        if let Some(dir) = log_dir {
            match BombeLogs::new(dir, permutation) {
                Ok(logs) => bombe.set_logs(logs),
                Err(e) => warn!("cannot open bombe logs under {}: {e}", dir.display()),
            }
        }
        bombe.set_cancel_token(Arc::clone(&cancel));
        bombe.solve()?;
        stops.extend(bombe.stops().iter().cloned());
    }
    Ok(stops)
}

/// A fresh flag suitable for the `cancel` argument of
/// [`run_permutations`].
pub fn cancel_handle() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}
