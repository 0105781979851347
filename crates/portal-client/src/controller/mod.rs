// crates/portal-client/src/controller/mod.rs
// View-state controllers: lists, detail fan-outs, mutations

pub mod detail;
pub mod list;
pub mod mutation;

pub use detail::{DetailController, DetailFallback, DetailState};
pub use list::{
    ErrorPolicy, ItemRemoval, ListView, LoadState, PageSource, PaginatedListController, PathPages,
};
pub use mutation::{
    Completed, ConfirmGuard, Mutation, MutationAction, MutationController, MutationOutcome, Press,
    Reconcile,
};
