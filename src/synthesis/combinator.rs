//! Parameter combinator
//!
//! Expands a [`ParameterSpec`] into concrete rows by varying one parameter
//! at a time: each value of each parameter yields one row, and every other
//! parameter is filled with a randomly chosen value from its pool of the
//! same polarity. Case counts therefore grow with the total number of
//! values rather than with the cartesian product.

use crate::models::{ParameterRow, ParameterSpec, Polarity};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::Value;

/// Expand `spec` into deduplicated rows for `polarity`
pub fn combine<R: Rng + ?Sized>(
    spec: &ParameterSpec,
    polarity: Polarity,
    rng: &mut R,
) -> Vec<ParameterRow> {
    let mut rows = Vec::new();

    for (varied, pools) in spec {
        for value in pools.pool(polarity) {
            // the varied parameter leads the row, the rest follow in declaration order
            let mut row = ParameterRow::with_capacity(spec.len());
            row.insert(varied.clone(), value.clone());
            for (name, other) in spec.iter().filter(|(name, _)| *name != varied) {
                row.insert(name.clone(), pick(other.pool(polarity), rng));
            }
            rows.push(row);
        }
    }

    dedup_rows(rows)
}

/// Random element of `pool`, or the empty string for an empty pool
fn pick<R: Rng + ?Sized>(pool: &[Value], rng: &mut R) -> Value {
    pool.choose(rng)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Drop structurally identical rows, keeping the first occurrence
pub fn dedup_rows(rows: Vec<ParameterRow>) -> Vec<ParameterRow> {
    let mut unique: Vec<ParameterRow> = Vec::with_capacity(rows.len());
    for row in rows {
        if !unique.contains(&row) {
            unique.push(row);
        }
    }
    unique
}
