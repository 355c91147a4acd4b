//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Accounts are entities: two accounts with equal balances are still different
/// accounts, and the ledger keys them by `id()`.
pub trait Entity {
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
