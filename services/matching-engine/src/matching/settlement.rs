//! Per-trade ledger updates
//!
//! Each trade settles as two legs: the maker's leg with the side opposite
//! the trade, the taker's leg with the trade's side. A leg either acquires
//! exposure in the direction the account already holds, or first closes the
//! standing position at the execution price and books any excess as a fresh
//! acquisition. Fees are recorded on the trade but not deducted here.

use dashmap::DashMap;
use rust_decimal::Decimal;
use types::account::Account;
use types::ids::MarketId;
use types::order::Side;
use types::trade::Trade;

/// Apply one settlement leg to an account's ledger
///
/// Acquisitions (buying while flat or long, selling while flat or short)
/// move the position by `amount` and debit `price * amount`. Otherwise the
/// standing position is closed out in full at the execution price before
/// the remainder, if any, flips the account to the other direction.
pub fn update_account(
    account: &mut Account,
    market: &MarketId,
    amount: Decimal,
    price: Decimal,
    side: Side,
) {
    let total = price * amount;
    let position = account.position(market);
    match side {
        Side::Buy => {
            if position >= Decimal::ZERO {
                account.apply_position(market, amount);
                account.apply_balance(-total);
            } else {
                // Close out the entire short at the execution price
                account.apply_position(market, -position);
                account.apply_balance(-position * price);
                let closed = position.abs();
                if closed < amount {
                    // Flip long
                    let flip = amount - closed;
                    account.apply_position(market, flip);
                    account.apply_balance(-flip * price);
                }
            }
        }
        Side::Sell => {
            if position <= Decimal::ZERO {
                account.apply_position(market, -amount);
                account.apply_balance(-total);
            } else {
                // Close out the entire long at the execution price
                account.apply_position(market, -position);
                account.apply_balance(-position * price);
                let closed = -position;
                if closed < amount {
                    // Flip short
                    let flip = amount - closed;
                    account.apply_position(market, -flip);
                    account.apply_balance(-flip * price);
                }
            }
        }
    }
}

/// Settle both legs of a trade
///
/// Accounts are created on first reference. The legs are applied one at a
/// time so a self-trade (same owner on both sides) settles without holding
/// two guards into the same map.
pub fn settle_trade(accounts: &DashMap<String, Account>, trade: &Trade) {
    let price = trade.price.as_decimal();
    {
        let mut maker = accounts
            .entry(trade.maker_owner.clone())
            .or_insert_with(|| Account::new(trade.maker_owner.clone()));
        update_account(
            &mut maker,
            &trade.symbol,
            trade.amount,
            price,
            trade.side.opposite(),
        );
    }
    {
        let mut taker = accounts
            .entry(trade.taker_owner.clone())
            .or_insert_with(|| Account::new(trade.taker_owner.clone()));
        update_account(&mut taker, &trade.symbol, trade.amount, price, trade.side);
    }
    tracing::debug!(trade_id = %trade.id, symbol = %trade.symbol, "settled trade");
}
