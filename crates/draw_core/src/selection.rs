use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

use crate::logging::DrawLogger;
use crate::ticket::{TicketRecord, TicketRejection};

/// Returns the entry keys in scan order for a draw.
pub fn shuffled_entries<R: Rng + ?Sized>(entry_keys: &[String], rng: &mut R) -> Vec<String> {
    let mut shuffled = entry_keys.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Scans the shuffled entries and accepts up to `max_winners` valid tickets.
///
/// Unreadable or invalid entries are logged and skipped; they never abort the
/// scan. Scanning stops once the limit is reached, so entries after the last
/// winner are never fetched. Winners are returned in acceptance order and
/// duplicate ticket identifiers from distinct entries are not collapsed.
pub fn select_winners<R: Rng + ?Sized>(
    entry_keys: &[String],
    max_winners: usize,
    rng: &mut R,
    fetch: &mut dyn FnMut(&str) -> Result<Vec<u8>, String>,
    logger: &dyn DrawLogger,
) -> Vec<TicketRecord> {
    let max_winners = max_winners.max(1);
    let mut winners = Vec::with_capacity(max_winners.min(entry_keys.len()));

    for entry_key in shuffled_entries(entry_keys, rng) {
        let record = match fetch(&entry_key)
            .map_err(TicketRejection::Unreadable)
            .and_then(|bytes| TicketRecord::decode(&bytes))
        {
            Ok(record) => record,
            Err(rejection) => {
                logger.error(
                    "entry_rejected",
                    json!({
                        "entry_key": entry_key,
                        "reason": rejection.to_string(),
                    }),
                );
                continue;
            }
        };

        winners.push(record);
        logger.info(
            "entry_accepted",
            json!({
                "entry_key": entry_key,
                "position": winners.len(),
            }),
        );

        if winners.len() >= max_winners {
            break;
        }
    }

    winners
}
