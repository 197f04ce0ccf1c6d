#![forbid(unsafe_code)]

//! Copy and share: reducers with no slice of their own that hand text to the
//! clipboard through [`Cmd`].

use crate::action::{Action, Cmd};
use crate::bus::Dispatch;
use crate::copy::copy_text;
use crate::error::{Feature, ViewerError};
use crate::location::LocationState;
use crate::store::Store;

pub fn reduce(store: &mut Store, cx: &Dispatch<'_>) -> Cmd {
    if !matches!(cx.action, Action::Copy | Action::Share { .. }) {
        return Cmd::None;
    }
    if !store.config.capabilities.clipboard {
        tracing::debug!(error = %ViewerError::Unsupported(Feature::Clipboard), "ignored");
        return Cmd::None;
    }
    match cx.action {
        Action::Copy => store
            .buffer
            .as_ref()
            .and_then(|buffer| {
                copy_text(
                    buffer,
                    &store.cursor,
                    store.select.range(),
                    &store.config.placeholders,
                )
            })
            .map_or(Cmd::None, Cmd::Copy),
        Action::Share { base } => Cmd::Share(LocationState::capture(store).share_url(base)),
        _ => Cmd::None,
    }
}
