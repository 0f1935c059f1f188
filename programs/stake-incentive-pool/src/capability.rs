//! Admin authorization.
//!
//! spec.md §1 scopes "access-control credentials (modeled as opaque
//! capability tokens)" out of the core as an external collaborator: this
//! crate does not decide who is allowed to hold one. `AdminCap` is
//! therefore a zero-sized bearer token — every admin-only operation takes
//! `&AdminCap` as evidence of authorization, but minting/distributing
//! `AdminCap`s (and deciding how many may exist) is the embedder's job,
//! matching spec.md §6: "Multiple capability tokens may coexist (they are
//! freely duplicable by the original admin)".

/// Opaque, freely-duplicable admin authorization evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminCap(());

impl AdminCap {
    /// Mint a new capability. Gating who can call this is outside the
    /// core's scope; the embedder owns that policy.
    pub fn issue() -> Self {
        AdminCap(())
    }
}
