use crate::constants::{
    AMBIENT_GROUP_ID, CONTAINER_ID, LABEL_ID, SHAPE_ID, STROKE_RGB, SVG_NS, TEXT_WAVE_ID,
};
use crate::dom::{self, set_attr};
use folio_core::RenderFrame;
use std::cell::RefCell;
use web_sys as web;

/// The SVG control a [`RenderFrame`] is written into.
pub struct SvgTarget {
    container: web::Element,
    shape: web::Element,
    text_wave: web::Element,
    label: web::Element,
    dots: Vec<web::Element>,
    last_text: RefCell<String>,
}

impl SvgTarget {
    pub fn new(document: &web::Document, ambient_count: usize) -> anyhow::Result<Self> {
        let group = dom::element_by_id(document, AMBIENT_GROUP_ID)?;
        group.set_inner_html("");
        let mut dots = Vec::with_capacity(ambient_count);
        for _ in 0..ambient_count {
            let dot = document
                .create_element_ns(Some(SVG_NS), "circle")
                .map_err(|e| anyhow::anyhow!("create circle: {:?}", e))?;
            set_attr(&dot, "fill", "rgba(99, 102, 241, 0.55)");
            group
                .append_child(&dot)
                .map_err(|e| anyhow::anyhow!("append circle: {:?}", e))?;
            dots.push(dot);
        }
        Ok(Self {
            container: dom::element_by_id(document, CONTAINER_ID)?,
            shape: dom::element_by_id(document, SHAPE_ID)?,
            text_wave: dom::element_by_id(document, TEXT_WAVE_ID)?,
            label: dom::element_by_id(document, LABEL_ID)?,
            dots,
            last_text: RefCell::new(String::new()),
        })
    }

    pub fn apply(&self, frame: &RenderFrame) {
        set_attr(&self.shape, "d", &frame.boundary.to_string());
        set_attr(&self.shape, "stroke-width", &format!("{:.2}", frame.stroke.width));
        set_attr(
            &self.shape,
            "stroke",
            &format!("rgba({STROKE_RGB}, {:.3})", frame.stroke.alpha),
        );
        set_attr(&self.text_wave, "d", &frame.text_curve.to_string());

        {
            let mut last = self.last_text.borrow_mut();
            if *last != frame.label.text {
                self.label.set_text_content(Some(&frame.label.text));
                last.clone_from(&frame.label.text);
            }
        }
        set_attr(&self.label, "opacity", &format!("{:.3}", frame.label.opacity));

        let p = frame.presence;
        let style = format!(
            "transform: translateY({:.2}px) rotate({:.3}deg) scale({:.4}); opacity: {:.3}; filter: blur({:.2}px)",
            frame.offset_y, frame.rotation_deg, p.scale, p.opacity, p.blur_px
        );
        set_attr(&self.container, "style", &style);

        for (dot, view) in self.dots.iter().zip(&frame.ambient) {
            set_attr(dot, "cx", &format!("{:.2}", view.position.x));
            set_attr(dot, "cy", &format!("{:.2}", view.position.y));
            set_attr(dot, "r", &format!("{:.2}", view.radius));
            set_attr(dot, "opacity", &format!("{:.3}", view.opacity));
        }
    }
}
