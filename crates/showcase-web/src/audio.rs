use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// One-shot narration clip backed by an `<audio>` element playing from an
/// in-memory blob.
pub struct Narration {
    element: web::HtmlAudioElement,
    object_url: String,
}

impl Narration {
    /// Wraps already-fetched clip bytes so playback needs no second request.
    pub fn from_bytes(bytes: &[u8], mime: &str) -> anyhow::Result<Self> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes).into());
        let options = web::BlobPropertyBag::new();
        options.set_type(mime);
        let blob = web::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| anyhow::anyhow!(format!("audio blob: {:?}", e)))?;
        let object_url = web::Url::create_object_url_with_blob(&blob)
            .map_err(|e| anyhow::anyhow!(format!("object url: {:?}", e)))?;
        let element = web::HtmlAudioElement::new_with_src(&object_url)
            .map_err(|e| anyhow::anyhow!(format!("audio element: {:?}", e)))?;
        element.set_preload("auto");
        Ok(Self {
            element,
            object_url,
        })
    }

    /// Starts playback from the beginning. Autoplay rejections are logged
    /// and otherwise ignored.
    pub fn play(&self) {
        self.element.set_current_time(0.0);
        match self.element.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    let reason = e
                        .dyn_ref::<js_sys::Error>()
                        .map(|err| String::from(err.message()))
                        .unwrap_or_else(|| format!("{:?}", e));
                    log::warn!("[audio] narration blocked: {reason}");
                }
            }),
            Err(e) => log::warn!("[audio] play() failed: {:?}", e),
        }
    }
}

impl Drop for Narration {
    fn drop(&mut self) {
        web::Url::revoke_object_url(&self.object_url).ok();
    }
}
