//! Service façade
//!
//! One module per entity. Workspace writes with children go through
//! [`reconcile`]; reads of nested trees go through [`projection`].

pub mod booking;
pub mod device;
pub mod projection;
pub mod reconcile;
pub mod room;
pub mod workspace;

pub use reconcile::ReconcileStats;
pub use workspace::Reconciled;
