//! `mlplay-clustering` aims to provide the k-means session of the playground.
//!
//! Unlike a batch clustering routine, the session keeps its centroids and the last assignment
//! between calls, so students can alternate the assign and update steps by hand, watch the
//! sum of squared distances shrink, change the number of clusters halfway or let the session
//! run until it settles.
//!
//! The free functions [`assign_step`] and [`update_step`] are the two halves of one iteration
//! without any session state attached.
mod k_means;

pub use k_means::*;
