use rocket::fairing::{Fairing, Info, Kind};
use rocket::outcome::Outcome;
use rocket::request::FlashMessage;
use rocket::{Data, Request};
use serde::Serialize;

use crate::csrf::CsrfToken;

/// Runs before routing and caches what every rendered page needs:
/// the CSRF token (issuing the cookie on first visit) and the pending flash message.
pub struct ContextFairing;

#[rocket::async_trait]
impl Fairing for ContextFairing {
    fn info(&self) -> Info {
        Info {
            name: "Template Context",
            kind: Kind::Request,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _data: &mut Data<'_>) {
        CsrfToken::for_request(request);

        // Reading the flash consumes it, so it shows up exactly once.
        if let Outcome::Success(Some(flash)) = request.guard::<Option<FlashMessage<'_>>>().await {
            let cached = CachedFlash {
                kind: flash.kind().to_string(),
                message: flash.message().to_string(),
            };
            request.local_cache(|| Some(cached));
        }
    }
}

/// Owned copy of the request's flash message.
#[derive(Clone, Debug, Serialize)]
pub struct CachedFlash {
    pub kind: String,
    pub message: String,
}
