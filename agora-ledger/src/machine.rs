//! The vote toggle state machine.
//!
//! A voter's state on a target is `Option<VoteValue>`: `None` means no
//! vote. Requesting the polarity currently held retracts the vote instead
//! of reaffirming it, mirroring the usual voting UX. The functions here
//! are pure; the repository applies the resolved [`VoteChange`] atomically.
use agora_shared::types::{CountDelta, LedgerWrite, VoteChange, VoteValue};

/// Resolves a cast request against the current state.
///
/// The full transition table:
///
/// | current | requested | next   | delta        |
/// |---------|-----------|--------|--------------|
/// | None    | Up        | Up     | up +1        |
/// | None    | Down      | Down   | down +1      |
/// | Up      | Up        | None   | up -1        |
/// | Up      | Down      | Down   | up -1, down +1 |
/// | Down    | Down      | None   | down -1      |
/// | Down    | Up        | Up     | down -1, up +1 |
pub fn transition(current: Option<VoteValue>, requested: VoteValue) -> VoteChange {
    match current {
        None => VoteChange {
            write: LedgerWrite::Insert { polarity: requested },
            delta: polarity_delta(requested, 1),
        },
        Some(held) if held == requested => VoteChange {
            write: LedgerWrite::Retract { from: held },
            delta: polarity_delta(held, -1),
        },
        Some(held) => VoteChange {
            write: LedgerWrite::Flip { from: held, to: requested },
            delta: CountDelta::new(
                polarity_delta(held, -1).up + polarity_delta(requested, 1).up,
                polarity_delta(held, -1).down + polarity_delta(requested, 1).down,
            ),
        },
    }
}

/// Resolves an unconditional retraction; `None` when there is nothing to
/// retract (a zero-delta no-op for the caller).
pub fn retraction(current: Option<VoteValue>) -> Option<VoteChange> {
    current.map(|held| VoteChange {
        write: LedgerWrite::Retract { from: held },
        delta: polarity_delta(held, -1),
    })
}

fn polarity_delta(polarity: VoteValue, amount: i64) -> CountDelta {
    match polarity {
        VoteValue::Up => CountDelta::new(amount, 0),
        VoteValue::Down => CountDelta::new(0, amount),
    }
}
