//! Per-day spending totals for the monthly spending chart.

use std::collections::{HashMap, HashSet};

use time::{Date, Month};

use crate::{account::Account, transaction::Transaction};

/// One point on the spending chart: how much was spent on one day of the
/// month.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingPoint {
    /// The day of the month, 1-31. Day 0 is the chart's explicit origin
    /// point.
    pub day_of_month: u8,
    /// The total spend for that day, as a positive number.
    pub amount: f64,
}

/// Aggregate credit-card spending in the month of `today` into per-day
/// totals.
///
/// Only transactions on credit-card accounts count. Amounts are negated so
/// spending shows up positive, and an explicit day-0/zero point anchors the
/// chart's origin. Points come back sorted ascending by day.
pub fn monthly_spending(
    accounts: &[Account],
    transactions: &[Transaction],
    today: Date,
) -> Vec<SpendingPoint> {
    let credit_card_ids: HashSet<&str> = accounts
        .iter()
        .filter(|account| account.is_credit_card())
        .map(|account| account.id.as_str())
        .collect();

    let mut per_day: HashMap<u8, f64> = HashMap::new();

    for transaction in transactions {
        if !credit_card_ids.contains(transaction.account_id.as_str()) {
            continue;
        }

        let date = transaction.display_date();
        if date.year() != today.year() || date.month() != today.month() {
            continue;
        }

        *per_day.entry(date.day()).or_insert(0.0) += -transaction.amount;
    }

    let mut points: Vec<SpendingPoint> = per_day
        .into_iter()
        .map(|(day_of_month, amount)| SpendingPoint {
            day_of_month,
            amount,
        })
        .collect();

    points.push(SpendingPoint {
        day_of_month: 0,
        amount: 0.0,
    });
    points.sort_by_key(|point| point.day_of_month);

    points
}

/// The full name of a month, for the chart subtitle.
pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

#[cfg(test)]
mod monthly_spending_tests {
    use time::macros::date;

    use crate::test_utils::{account, credit_card, transaction};

    use super::{SpendingPoint, monthly_spending};

    #[test]
    fn aggregates_per_day_with_a_zero_origin() {
        let accounts = vec![credit_card("act-1", "Rewards Card", -35.0)];
        let transactions = vec![
            transaction("txn-1", "act-1", -20.0, date!(2026 - 08 - 05)),
            transaction("txn-2", "act-1", -5.0, date!(2026 - 08 - 05)),
            transaction("txn-3", "act-1", -10.0, date!(2026 - 08 - 09)),
        ];

        let points = monthly_spending(&accounts, &transactions, date!(2026 - 08 - 15));

        assert_eq!(
            points,
            vec![
                SpendingPoint {
                    day_of_month: 0,
                    amount: 0.0
                },
                SpendingPoint {
                    day_of_month: 5,
                    amount: 25.0
                },
                SpendingPoint {
                    day_of_month: 9,
                    amount: 10.0
                },
            ]
        );
    }

    #[test]
    fn ignores_bank_account_transactions() {
        let accounts = vec![
            credit_card("act-1", "Rewards Card", -35.0),
            account("act-2", "Everyday Checking"),
        ];
        let transactions = vec![
            transaction("txn-1", "act-1", -20.0, date!(2026 - 08 - 05)),
            transaction("txn-2", "act-2", -100.0, date!(2026 - 08 - 05)),
        ];

        let points = monthly_spending(&accounts, &transactions, date!(2026 - 08 - 15));

        assert_eq!(
            points,
            vec![
                SpendingPoint {
                    day_of_month: 0,
                    amount: 0.0
                },
                SpendingPoint {
                    day_of_month: 5,
                    amount: 20.0
                },
            ]
        );
    }

    #[test]
    fn ignores_other_months() {
        let accounts = vec![credit_card("act-1", "Rewards Card", -35.0)];
        let transactions = vec![
            transaction("txn-1", "act-1", -20.0, date!(2026 - 07 - 28)),
            transaction("txn-2", "act-1", -5.0, date!(2025 - 08 - 05)),
        ];

        let points = monthly_spending(&accounts, &transactions, date!(2026 - 08 - 15));

        assert_eq!(
            points,
            vec![SpendingPoint {
                day_of_month: 0,
                amount: 0.0
            }]
        );
    }

    #[test]
    fn refunds_reduce_the_day_total() {
        let accounts = vec![credit_card("act-1", "Rewards Card", -35.0)];
        let transactions = vec![
            transaction("txn-1", "act-1", -20.0, date!(2026 - 08 - 05)),
            transaction("txn-2", "act-1", 5.0, date!(2026 - 08 - 05)),
        ];

        let points = monthly_spending(&accounts, &transactions, date!(2026 - 08 - 15));

        assert_eq!(points[1].amount, 15.0);
    }
}
