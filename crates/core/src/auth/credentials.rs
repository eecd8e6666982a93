/// Secrets presented with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: Option<String>,
}

impl Credentials {
    /// Pull an API key out of request headers.
    ///
    /// `X-API-Key: <key>` wins over `Authorization: Bearer <key>`. Header
    /// names and the bearer scheme are matched case-insensitively.
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut api_key = None;
        let mut bearer = None;

        for (name, value) in headers {
            if name.eq_ignore_ascii_case("x-api-key") {
                api_key = Some(value.trim().to_string());
            } else if name.eq_ignore_ascii_case("authorization") {
                bearer = bearer_token(value).map(str::to_string);
            }
        }

        Self {
            api_key: api_key.or(bearer).filter(|k| !k.is_empty()),
        }
    }
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
}
