use chrono::NaiveDateTime;
use model::entities::hourly_rate;
use rust_decimal::Decimal;

use crate::currency::PriceConverter;

/// Picks the rate record that applies to a user at a point in time: the
/// record with the greatest `effective_from` that is still <= `at`.
///
/// The input does not need to be sorted; every qualifying candidate is
/// considered. When two records share the same `effective_from`, the one
/// with the higher id wins, so resolution is deterministic regardless of
/// query return order.
pub fn resolve_rate<'a>(
    user_id: i32,
    at: NaiveDateTime,
    rates: &'a [hourly_rate::Model],
) -> Option<&'a hourly_rate::Model> {
    let mut winner: Option<&hourly_rate::Model> = None;

    for rate in rates {
        if rate.user_id != user_id || rate.effective_from > at {
            continue;
        }

        winner = match winner {
            None => Some(rate),
            Some(best)
                if rate.effective_from > best.effective_from
                    || (rate.effective_from == best.effective_from && rate.id > best.id) =>
            {
                Some(rate)
            }
            Some(best) => Some(best),
        };
    }

    winner
}

/// The user's hourly price in the base currency at the given time.
///
/// A user without a qualifying rate record works for free: the resolved
/// price is zero, not an error.
pub fn resolve_hourly_price(
    user_id: i32,
    at: NaiveDateTime,
    rates: &[hourly_rate::Model],
    converter: &dyn PriceConverter,
) -> Decimal {
    resolve_rate(user_id, at, rates)
        .map(|rate| converter.price_in_base(&rate.currency, rate.rate))
        .unwrap_or(Decimal::ZERO)
}
