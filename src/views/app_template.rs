use std::borrow::Cow;
use rocket::request::Request;
use rocket::response::{Responder, Result};
use rocket::serde::json::serde_json;
use rocket_dyn_templates::Template;
use crate::csrf::CsrfToken;
use crate::fairings::context::CachedFlash;

/// Template responder that merges request-wide values into the handler's context:
/// `csrf_token`, `flash` and `active_nav`. Handler values win on conflicts.
pub struct AppTemplate {
    pub name: Cow<'static, str>,
    pub context: serde_json::Value,
}

impl AppTemplate {
    pub fn new<N, C>(name: N, context: C) -> Self
    where
        N: Into<Cow<'static, str>>,
        C: serde::Serialize,
    {
        AppTemplate {
            name: name.into(),
            context: serde_json::to_value(context).unwrap_or(serde_json::json!({})),
        }
    }
}

/// Navigation entry highlighted for a request path.
pub fn active_nav(path: &str) -> &'static str {
    if path.starts_with("/categories") || path.contains("_category") {
        "categories"
    } else {
        "tasks"
    }
}

impl<'r> Responder<'r, 'static> for AppTemplate {
    fn respond_to(self, request: &'r Request<'_>) -> Result<'static> {
        let mut context = serde_json::Map::new();

        context.insert(
            "csrf_token".into(),
            serde_json::Value::String(CsrfToken::for_request(request).token().to_string()),
        );

        if let Some(flash) = request.local_cache(|| None::<CachedFlash>) {
            if let Ok(value) = serde_json::to_value(flash) {
                context.insert("flash".into(), value);
            }
        }

        let path = request.uri().path();
        context.insert(
            "active_nav".into(),
            serde_json::Value::String(active_nav(path.as_str()).to_string()),
        );

        if let serde_json::Value::Object(local) = self.context {
            context.extend(local);
        }

        Template::render(self.name, serde_json::Value::Object(context)).respond_to(request)
    }
}
