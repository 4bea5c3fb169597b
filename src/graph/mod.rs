//! Link graph parsing and link-matrix construction
//!
//! [`links::LinkList`] holds the sparse per-page outbound links read from
//! text; [`builder::LinkMatrixBuilder`] densifies them into the
//! column-stochastic matrix the solver consumes.

pub mod builder;
pub mod links;
