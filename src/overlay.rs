use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The play/pause button that floats under the model.
#[derive(Clone)]
pub struct Overlay {
    button: Option<web::HtmlElement>,
    label: Option<web::Element>,
}

impl Overlay {
    pub fn find(document: &web::Document, button_id: &str, label_id: &str) -> Self {
        let button = document
            .get_element_by_id(button_id)
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        let label = document.get_element_by_id(label_id);
        if button.is_none() {
            log::warn!("[overlay] missing #{}", button_id);
        }
        if label.is_none() {
            log::warn!("[overlay] missing #{}", label_id);
        }
        Self { button, label }
    }

    #[inline]
    pub fn show(&self) {
        if let Some(el) = &self.button {
            _ = el.class_list().remove_1("hidden");
            _ = el.style().remove_property("display");
        }
    }

    #[inline]
    pub fn hide(&self) {
        if let Some(el) = &self.button {
            _ = el.class_list().add_1("hidden");
            _ = el.style().set_property("display", "none");
        }
    }

    pub fn set_label(&self, text: &str) {
        if let Some(el) = &self.label {
            el.set_text_content(Some(text));
        }
    }

    /// Place the midpoint of the button's top edge at `pos`, in viewport
    /// CSS pixels (client coordinates).
    pub fn set_position(&self, pos: Vec2) {
        if let Some(el) = &self.button {
            let style = el.style();
            _ = style.set_property("left", &format!("{:.1}px", pos.x));
            _ = style.set_property("top", &format!("{:.1}px", pos.y));
            _ = style.set_property("transform", "translate(-50%, 0)");
        }
    }
}
