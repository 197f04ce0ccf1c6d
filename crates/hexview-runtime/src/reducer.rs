#![forbid(unsafe_code)]

//! Slice reducers.
//!
//! One module per slice, each exposing
//! `fn reduce(&mut Store, &Dispatch<'_>) -> Cmd`. A reducer writes only its
//! own slice; reactions to other slices compare the store against
//! [`Dispatch::before`](crate::bus::Dispatch::before).

pub mod cursor;
pub mod history;
pub mod hover;
pub mod layout;
pub mod lifecycle;
pub mod scroll;
pub mod search;
pub mod select;
pub mod share;
