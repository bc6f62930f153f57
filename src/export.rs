//! Non-interactive rendering of the block as an HTML fragment.
//!
//! This is what `--print` writes. The editor is never part of it: in edit
//! mode the content area is an empty placeholder and no editor is loaded.

use crate::app::{Mode, Model};
use crate::markdown;
use crate::ui::HeaderControl;

/// Render the block as HTML, marking the control for the model's mode.
///
/// # Example
///
/// ```
/// use markblock::app::Model;
/// use markblock::export::render_static;
///
/// let html = render_static(&Model::new("# Hi", (80, 24)));
/// assert!(html.contains("<h1>Hi</h1>"));
/// ```
pub fn render_static(model: &Model) -> String {
    let mut out = String::from("<div class=\"markblock\">\n<div class=\"markblock-header\">\n");
    for control in HeaderControl::ALL {
        if control.mode() == model.mode {
            out.push_str(&format!(
                "<button type=\"button\" class=\"active\" style=\"background-color: {}\">{}</button>\n",
                model.theme.content_hex(),
                control.label()
            ));
        } else {
            out.push_str(&format!(
                "<button type=\"button\">{}</button>\n",
                control.label()
            ));
        }
    }
    out.push_str("</div>\n");

    match model.mode {
        Mode::Preview => {
            let html = markdown::render(model.text());
            out.push_str("<div class=\"prose\">\n");
            out.push_str(html.as_str());
            out.push_str("</div>\n");
        }
        Mode::Edit => out.push_str("<div class=\"editor-placeholder\"></div>\n"),
    }
    out.push_str("</div>\n");
    out
}
