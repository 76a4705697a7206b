//! Route table rendering.

use routeglue_compiler::RouteDescriptor;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Render routes as aligned `METHOD url -> handler` lines.
pub fn render_text<H>(routes: &[RouteDescriptor<H>]) -> String {
    let method_width = routes.iter().map(|r| r.method.len()).max().unwrap_or(0);
    let url_width = routes.iter().map(|r| r.url.len()).max().unwrap_or(0);

    let mut out = String::new();
    for route in routes {
        let locations: Vec<&str> = route.schema.as_map().keys().map(String::as_str).collect();
        out.push_str(&format!(
            "{:<mw$}  {:<uw$}  -> {}",
            route.method,
            route.url,
            route.handler_name,
            mw = method_width,
            uw = url_width
        ));
        if !locations.is_empty() {
            out.push_str(&format!("  [{}]", locations.join(", ")));
        }
        out.push('\n');
    }
    out
}

/// Render routes as a pretty JSON array (handlers omitted).
pub fn render_json<H>(routes: &[RouteDescriptor<H>]) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    #[serde(bound = "")]
    struct RouteTable<'a, H> {
        routes: &'a [RouteDescriptor<H>],
        total: usize,
    }

    serde_json::to_string_pretty(&RouteTable {
        routes,
        total: routes.len(),
    })
}
