use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::HtmlImageElement;

use crate::behaviors::observer::OneShotObserver;
use crate::dom;
use crate::error::PageError;

pub const LAZY_IMAGES: &str = r#"img[loading="lazy"]"#;
const LOADED_CLASS: &str = "loaded";

/// `'loading' in HTMLImageElement.prototype`
pub fn native_lazy_loading() -> bool {
    let Some(window) = dom::window() else {
        return false;
    };
    Reflect::get(&window, &JsValue::from_str("HTMLImageElement"))
        .and_then(|ctor| Reflect::get(&ctor, &JsValue::from_str("prototype")))
        .and_then(|proto| Reflect::has(&proto, &JsValue::from_str("loading")))
        .unwrap_or(false)
}

/// Prefers a non-empty `data-src`, keeping the current source otherwise.
pub fn lazy_source(data_src: Option<String>, current: String) -> String {
    data_src.filter(|src| !src.is_empty()).unwrap_or(current)
}

pub fn wire() -> Result<Option<OneShotObserver>, PageError> {
    if native_lazy_loading() {
        debug!("Native lazy loading available");
        return Ok(None);
    }
    let images = dom::query_all(LAZY_IMAGES);
    if images.is_empty() {
        return Ok(None);
    }
    let observer = OneShotObserver::new(None, |element| {
        let Some(img) = element.dyn_ref::<HtmlImageElement>() else {
            return;
        };
        img.set_src(&lazy_source(img.get_attribute("data-src"), img.src()));
        let _ = img.class_list().add_1(LOADED_CLASS);
    })?;
    observer.observe_all(&images);
    debug!("Lazy-loading fallback for {} images", images.len());
    Ok(Some(observer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_src_wins_when_present() {
        assert_eq!(
            lazy_source(Some("/img/full.jpg".into()), "/img/thumb.jpg".into()),
            "/img/full.jpg"
        );
    }

    #[test]
    fn falls_back_to_current_source() {
        assert_eq!(lazy_source(None, "/img/thumb.jpg".into()), "/img/thumb.jpg");
        assert_eq!(lazy_source(Some(String::new()), "/img/thumb.jpg".into()), "/img/thumb.jpg");
    }
}
