#![forbid(unsafe_code)]

//! Data loading and the lifecycle flags.

use hexview_core::bytes::ByteBuffer;

use crate::action::{Action, Cmd};
use crate::bus::Dispatch;
use crate::store::{LoadStatus, Store};

pub fn reduce(store: &mut Store, cx: &Dispatch<'_>) -> Cmd {
    match cx.action {
        Action::Load(data) => load(store, data.as_deref()),
        Action::SetLoading { message, progress } => {
            let loading = &mut store.lifecycle.loading;
            loading.status = LoadStatus::Loading;
            loading.message = message.clone();
            loading.progress = (*progress).min(100);
        }
        Action::Resize(_) => {
            store.lifecycle.measured = true;
            store.lifecycle.initialized = store.buffer.is_some();
        }
        _ => {}
    }
    Cmd::None
}

fn load(store: &mut Store, data: Option<&str>) {
    let loading = &mut store.lifecycle.loading;
    loading.errors.clear();
    loading.message = None;
    loading.progress = 100;

    match data.map(str::trim).filter(|text| !text.is_empty()) {
        None => {
            tracing::debug!("no data to show");
            store.buffer = None;
            loading.status = LoadStatus::Empty;
        }
        Some(text) => match ByteBuffer::from_hex(text) {
            Ok(buffer) => {
                tracing::debug!(len = buffer.len(), "data loaded");
                store.buffer = Some(buffer);
                loading.status = LoadStatus::Ready;
            }
            Err(err) => {
                tracing::warn!(error = %err, "rejecting malformed data");
                store.buffer = None;
                loading.status = LoadStatus::Failed;
                loading.errors.push(err.into());
            }
        },
    }
    store.lifecycle.initialized = store.lifecycle.measured && store.buffer.is_some();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewerError;
    use crate::reducer::test_util::run;
    use crate::store::ViewerStatus;
    use hexview_core::bytes::DataError;
    use hexview_core::geometry::Size;

    #[test]
    fn none_and_blank_are_empty() {
        for data in [None, Some(String::new()), Some("  \n".to_owned())] {
            let mut store = Store::default();
            run(&mut store, Action::Load(data));
            assert_eq!(store.status(), ViewerStatus::Empty);
            assert!(store.buffer.is_none());
        }
    }

    #[test]
    fn load_then_resize_activates() {
        let mut store = Store::default();
        run(&mut store, Action::Load(Some("0011".into())));
        assert_eq!(store.status(), ViewerStatus::Initialized);
        run(&mut store, Action::Resize(Size::new(300, 72)));
        assert_eq!(store.status(), ViewerStatus::Active);
    }

    #[test]
    fn resize_then_load_activates() {
        let mut store = Store::default();
        run(&mut store, Action::Resize(Size::new(300, 72)));
        assert_eq!(store.status(), ViewerStatus::Loading);
        run(&mut store, Action::Load(Some("0011".into())));
        assert_eq!(store.status(), ViewerStatus::Active);
    }

    #[test]
    fn malformed_data_sticks_until_next_load() {
        let mut store = Store::default();
        run(&mut store, Action::Load(Some("abc".into())));
        let expected = ViewerStatus::Error(vec![ViewerError::DataInvalid(DataError::OddLength {
            digits: 3,
        })]);
        assert_eq!(store.status(), expected);
        run(&mut store, Action::Resize(Size::new(300, 72)));
        assert_eq!(store.status(), expected);
        run(&mut store, Action::Load(Some("ab".into())));
        assert_eq!(store.status(), ViewerStatus::Active);
    }

    #[test]
    fn loading_progress_clamped() {
        let mut store = Store::default();
        run(
            &mut store,
            Action::SetLoading {
                message: Some("fetching".into()),
                progress: 250,
            },
        );
        assert_eq!(store.lifecycle.loading.progress, 100);
        assert_eq!(store.lifecycle.loading.message.as_deref(), Some("fetching"));
        assert_eq!(store.status(), ViewerStatus::Loading);
    }
}
