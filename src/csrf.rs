use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::Rng;
use rocket::http::{Cookie, SameSite};
use rocket::request::{FromRequest, Outcome, Request};
use std::time::{SystemTime, UNIX_EPOCH};

/// Token lifetime in seconds
const CSRF_TOKEN_EXPIRY: u64 = 3600;

const CSRF_COOKIE: &str = "csrf_token";

/// Per-client CSRF token: issue timestamp (8 bytes, big endian) followed by
/// 32 random bytes, URL-safe base64. Kept in a private cookie and echoed in
/// every form.
#[derive(Debug, Clone)]
pub struct CsrfToken(pub String);

impl CsrfToken {
    /// Generates a fresh token.
    pub fn generate() -> Self {
        Self::issued_at_secs(now_secs())
    }

    fn issued_at_secs(timestamp: u64) -> Self {
        let random_bytes: [u8; 32] = rand::thread_rng().gen();

        let mut token_data = timestamp.to_be_bytes().to_vec();
        token_data.extend_from_slice(&random_bytes);

        CsrfToken(URL_SAFE_NO_PAD.encode(&token_data))
    }

    /// Accepts `submitted` only if it matches this token and the token has not expired.
    pub fn verify(&self, submitted: &str) -> bool {
        self.0 == submitted && !self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        match self.issued_at() {
            Some(issued) => now_secs().saturating_sub(issued) >= CSRF_TOKEN_EXPIRY,
            None => true,
        }
    }

    fn issued_at(&self) -> Option<u64> {
        let decoded = URL_SAFE_NO_PAD.decode(&self.0).ok()?;
        let timestamp: [u8; 8] = decoded.get(..8)?.try_into().ok()?;
        Some(u64::from_be_bytes(timestamp))
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    /// The token for this request, cached for the request's lifetime.
    /// Reads the private cookie, or issues a new token when it is missing or expired.
    pub fn for_request<'r>(request: &'r Request<'_>) -> &'r CsrfToken {
        request.local_cache(|| {
            let cookies = request.cookies();
            let existing = cookies
                .get_private(CSRF_COOKIE)
                .map(|c| CsrfToken(c.value().to_string()))
                .filter(|t| !t.is_expired());

            match existing {
                Some(token) => token,
                None => {
                    let token = CsrfToken::generate();
                    cookies.add_private(
                        Cookie::build((CSRF_COOKIE, token.0.clone()))
                            .path("/")
                            .same_site(SameSite::Strict),
                    );
                    token
                }
            }
        })
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CsrfToken {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(CsrfToken::for_request(request).clone())
    }
}
