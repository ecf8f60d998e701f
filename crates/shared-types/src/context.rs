//! Per-request context objects.
//!
//! Everything the state and annotation engines need from the surrounding
//! request is carried explicitly here; there is no thread-local current
//! context to reach for.

use crate::config::ProjectStage;
use crate::fields;
use crate::session::Session;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A resource contributed to the view root by an annotation handler
/// (stylesheet, script, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentResource {
    pub name: String,
    pub library: Option<String>,
    /// Insertion target within the page ("head", "body", ...).
    pub target: Option<String>,
}

/// Minimal markup sink for the hidden postback fields.
///
/// The real rendering pipeline is out of scope; the codecs only ever emit
/// hidden `<input>` elements through this buffer.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    buf: String,
}

impl ResponseWriter {
    pub fn write_hidden_input(&mut self, name: &str, value: &str, autocomplete_off: bool) {
        self.buf.push_str("<input type=\"hidden\" name=\"");
        escape_attribute(&mut self.buf, name);
        self.buf.push_str("\" value=\"");
        escape_attribute(&mut self.buf, value);
        self.buf.push('"');
        if autocomplete_off {
            self.buf.push_str(" autocomplete=\"off\"");
        }
        self.buf.push_str("/>");
    }

    pub fn markup(&self) -> &str {
        &self.buf
    }

    pub fn into_markup(self) -> String {
        self.buf
    }
}

fn escape_attribute(out: &mut String, raw: &str) {
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

/// Request-scoped scratch state shared between the codec's write and read
/// halves within one request.
#[derive(Debug, Default)]
pub struct RequestAttributes {
    /// Composite token already written during this request, if any. A second
    /// `write_state` in the same request reuses it verbatim.
    pub view_state_token: Option<String>,
    /// Logical id recovered while restoring state, echoed on the next write.
    pub logical_view_id: Option<String>,
    /// Actual id recovered while restoring state; reused on partial requests.
    pub actual_view_id: Option<String>,
    /// Resource dependencies already pushed to the view root this request.
    pub processed_dependencies: HashSet<ComponentResource>,
}

/// Explicit per-request context.
pub struct RequestContext {
    params: HashMap<String, String>,
    partial: bool,
    transient_view: bool,
    render_kit_id: Option<String>,
    client_window: Option<String>,
    session: Option<Arc<Session>>,
    stage: ProjectStage,
    /// Request-scoped scratch shared by the codec halves.
    pub attributes: RequestAttributes,
    /// Sink for the hidden postback fields.
    pub response: ResponseWriter,
    /// Resources pushed to the view root by annotation handlers.
    pub view_resources: Vec<ComponentResource>,
}

impl RequestContext {
    /// A fresh non-postback request in Production stage.
    pub fn new() -> Self {
        Self {
            params: HashMap::new(),
            partial: false,
            transient_view: false,
            render_kit_id: None,
            client_window: None,
            session: None,
            stage: ProjectStage::Production,
            attributes: RequestAttributes::default(),
            response: ResponseWriter::default(),
            view_resources: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    /// Marks this request as a partial (AJAX) re-render.
    pub fn partial(mut self) -> Self {
        self.partial = true;
        self
    }

    /// Marks the current view root transient: no state is to be persisted.
    pub fn transient_view(mut self) -> Self {
        self.transient_view = true;
        self
    }

    pub fn with_render_kit_id(mut self, id: impl Into<String>) -> Self {
        self.render_kit_id = Some(id.into());
        self
    }

    pub fn with_client_window(mut self, id: impl Into<String>) -> Self {
        self.client_window = Some(id.into());
        self
    }

    pub fn with_stage(mut self, stage: ProjectStage) -> Self {
        self.stage = stage;
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The raw view-state parameter, with the empty string normalized away.
    pub fn state_param(&self) -> Option<&str> {
        self.param(fields::VIEW_STATE_PARAM).filter(|v| !v.is_empty())
    }

    /// A request is a postback iff it carries the view-state field.
    pub fn is_postback(&self) -> bool {
        self.params.contains_key(fields::VIEW_STATE_PARAM)
    }

    pub fn is_partial_request(&self) -> bool {
        self.partial
    }

    pub fn is_transient_view(&self) -> bool {
        self.transient_view
    }

    pub fn render_kit_id(&self) -> Option<&str> {
        self.render_kit_id.as_deref()
    }

    pub fn client_window(&self) -> Option<&str> {
        self.client_window.as_deref()
    }

    pub fn stage(&self) -> ProjectStage {
        self.stage
    }

    /// The session, if one was established for this request.
    pub fn session(&self) -> Option<&Arc<Session>> {
        self.session.as_ref()
    }

    /// The session, created on demand — the `getSession(true)` analog used
    /// by the write path.
    pub fn ensure_session(&mut self) -> Arc<Session> {
        self.session
            .get_or_insert_with(|| Arc::new(Session::new()))
            .clone()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
