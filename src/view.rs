use crate::core::constants::{KNOB_ACTIVE_CLASS, SPRITE_CLASS, SWAY_AMPLITUDE_MIN_DEG};
use crate::core::{rotate_transform, KnobVisual, Sprite, SpriteSink};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct ElementKnobVisual {
    element: web::HtmlElement,
}

impl ElementKnobVisual {
    pub fn new(element: web::HtmlElement) -> Self {
        Self { element }
    }
}

impl KnobVisual for ElementKnobVisual {
    fn set_rotation(&mut self, degrees: f32) {
        _ = self
            .element
            .style()
            .set_property("transform", &rotate_transform(degrees));
    }

    fn set_active(&mut self, active: bool) {
        let cl = self.element.class_list();
        if active {
            _ = cl.add_1(KNOB_ACTIVE_CLASS);
        } else {
            _ = cl.remove_1(KNOB_ACTIVE_CLASS);
        }
    }
}

/// One absolutely positioned `div` per sprite inside the crowd container.
pub struct DomSpriteSink {
    document: web::Document,
    container: web::Element,
    nodes: Vec<web::HtmlElement>,
}

impl DomSpriteSink {
    pub fn new(document: web::Document, container: web::Element) -> Self {
        Self {
            document,
            container,
            nodes: Vec::new(),
        }
    }

    fn create_node(&self, sprite: &Sprite) -> Result<web::HtmlElement, JsValue> {
        let el = self
            .document
            .create_element("div")?
            .dyn_into::<web::HtmlElement>()
            .map_err(JsValue::from)?;
        el.set_class_name(SPRITE_CLASS);
        let style = el.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &format!("{:.1}px", sprite.position.x))?;
        style.set_property("top", &format!("{:.1}px", sprite.position.y))?;
        style.set_property("background-color", sprite.color)?;
        style.set_property("transform-origin", "50% 100%")?;
        style.set_property(
            "transform",
            &rotate_transform(sprite.direction * SWAY_AMPLITUDE_MIN_DEG),
        )?;
        self.container.append_child(&el)?;
        Ok(el)
    }
}

impl SpriteSink for DomSpriteSink {
    fn rebuild(&mut self, sprites: &[Sprite]) {
        self.clear();
        self.nodes.reserve(sprites.len());
        for sprite in sprites {
            match self.create_node(sprite) {
                Ok(el) => self.nodes.push(el),
                Err(e) => {
                    log::error!("[crowd] sprite markup failed: {:?}", e);
                    break;
                }
            }
        }
    }

    fn set_sway(&mut self, index: usize, degrees: f32) {
        if let Some(el) = self.nodes.get(index) {
            _ = el
                .style()
                .set_property("transform", &rotate_transform(degrees));
        }
    }

    fn clear(&mut self) {
        for el in self.nodes.drain(..) {
            el.remove();
        }
    }
}
