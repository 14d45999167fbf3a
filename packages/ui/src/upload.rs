//! Reading a chosen file and previewing it before upload.

use api::ImageUpload;
use dioxus::prelude::*;

/// The first file of a file-input change, read into memory.
pub async fn read_first_file(evt: FormEvent) -> Option<ImageUpload> {
    let file = evt.files().into_iter().next()?;
    let name = file.name();
    match file.read_bytes().await {
        Ok(bytes) => Some(ImageUpload::new(name, file.content_type(), bytes.to_vec())),
        Err(e) => {
            tracing::error!("Failed to read {}: {}", name, e);
            None
        }
    }
}

/// An object URL showing `upload`, to be released with [`revoke_preview`].
#[cfg(target_arch = "wasm32")]
pub fn preview_url(upload: &ImageUpload) -> Option<String> {
    let bytes = js_sys::Uint8Array::from(upload.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&upload.content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
    web_sys::Url::create_object_url_with_blob(&blob).ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn preview_url(_upload: &ImageUpload) -> Option<String> {
    None
}

#[cfg(target_arch = "wasm32")]
pub fn revoke_preview(url: &str) {
    if let Err(e) = web_sys::Url::revoke_object_url(url) {
        tracing::warn!("Failed to revoke preview URL: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn revoke_preview(_url: &str) {}

/// The object URL currently previewed. The previous URL is revoked when it is
/// replaced, and the last one when this value is dropped with its component.
#[derive(Debug)]
pub struct PreviewUrl {
    url: Option<String>,
    revoke: fn(&str),
}

impl Default for PreviewUrl {
    fn default() -> Self {
        Self::with_revoke(revoke_preview)
    }
}

impl PreviewUrl {
    pub fn with_revoke(revoke: fn(&str)) -> Self {
        Self { url: None, revoke }
    }

    pub fn get(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn replace(&mut self, next: Option<String>) {
        if let Some(old) = self.url.take() {
            (self.revoke)(&old);
        }
        self.url = next;
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        self.replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    thread_local! {
        static REVOKED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn record(url: &str) {
        REVOKED.with(|r| r.borrow_mut().push(url.to_string()));
    }

    fn revoked() -> Vec<String> {
        REVOKED.with(|r| r.borrow().clone())
    }

    fn reset() {
        REVOKED.with(|r| r.borrow_mut().clear());
    }

    #[test]
    fn test_replace_revokes_previous_url() {
        reset();
        let mut preview = PreviewUrl::with_revoke(record);
        preview.replace(Some("blob:a".into()));
        preview.replace(Some("blob:b".into()));
        assert_eq!(preview.get(), Some("blob:b"));
        assert_eq!(revoked(), vec!["blob:a"]);

        preview.replace(None);
        assert_eq!(preview.get(), None);
        assert_eq!(revoked(), vec!["blob:a", "blob:b"]);
    }

    #[test]
    fn test_drop_revokes_current_url() {
        reset();
        {
            let mut preview = PreviewUrl::with_revoke(record);
            preview.replace(Some("blob:c".into()));
        }
        {
            let _empty = PreviewUrl::with_revoke(record);
        }
        assert_eq!(revoked(), vec!["blob:c"]);
    }

    #[test]
    fn test_drop_with_component_scope_revokes() {
        fn app() -> Element {
            let _preview = use_signal(|| {
                let mut preview = PreviewUrl::with_revoke(record);
                preview.replace(Some("blob:d".into()));
                preview
            });
            rsx! {}
        }

        reset();
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        assert!(revoked().is_empty());
        drop(dom);
        assert_eq!(revoked(), vec!["blob:d"]);
    }
}
