//! Navigation routes

use std::fmt;

/// A screen of the application, addressed by a web-style path
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Login,
    AccountsDashboard,
    MoveMoney {
        account_id: Option<String>,
    },
    CardControls {
        account_id: Option<String>,
    },
    /// Catch-all, keeps the unmatched path for display
    NotFound(String),
}

impl Route {
    /// Parse a path such as `/move-money?accountId=acc123`
    pub fn parse(path: &str) -> Self {
        let (base, query) = match path.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (path, None),
        };
        let account_id = query.and_then(|q| query_param(q, "accountId"));

        match base.trim_end_matches('/') {
            "" | "/login" => Route::Login,
            "/accounts-dashboard" => Route::AccountsDashboard,
            "/move-money" => Route::MoveMoney { account_id },
            "/card-controls" => Route::CardControls { account_id },
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Path form of the route; `parse(route.path())` yields the route again
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::AccountsDashboard => "/accounts-dashboard".to_string(),
            Route::MoveMoney { account_id } => with_account("/move-money", account_id),
            Route::CardControls { account_id } => with_account("/card-controls", account_id),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Screens reachable only with an active session
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::AccountsDashboard | Route::MoveMoney { .. } | Route::CardControls { .. }
        )
    }

    /// Screens that hold a form; skipped when going back through history
    pub fn is_form_view(&self) -> bool {
        matches!(self, Route::Login | Route::MoveMoney { .. })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn with_account(base: &str, account_id: &Option<String>) -> String {
    match account_id {
        Some(id) => format!("{base}?accountId={}", urlencoding::encode(id)),
        None => base.to_string(),
    }
}

/// Value of `key` in a query string, form-decoded (`+` is a space)
fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| {
            let v = v.replace('+', " ");
            urlencoding::decode(&v)
                .map(|decoded| decoded.into_owned())
                .unwrap_or(v)
        })
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Login);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/accounts-dashboard"), Route::AccountsDashboard);
        assert_eq!(
            Route::parse("/move-money?accountId=acc123"),
            Route::MoveMoney {
                account_id: Some("acc123".to_string())
            }
        );
        assert_eq!(
            Route::parse("/card-controls"),
            Route::CardControls { account_id: None }
        );
    }

    #[test]
    fn test_parse_ignores_other_query_params() {
        assert_eq!(
            Route::parse("/card-controls?tab=1&accountId=acc456"),
            Route::CardControls {
                account_id: Some("acc456".to_string())
            }
        );
        assert_eq!(
            Route::parse("/move-money?accountId="),
            Route::MoveMoney { account_id: None }
        );
    }

    #[test]
    fn test_parse_unknown_is_not_found() {
        assert_eq!(
            Route::parse("/settings"),
            Route::NotFound("/settings".to_string())
        );
    }

    #[test]
    fn test_path_round_trips() {
        let routes = [
            Route::Login,
            Route::AccountsDashboard,
            Route::MoveMoney {
                account_id: Some("acc123".to_string()),
            },
            Route::MoveMoney { account_id: None },
            Route::CardControls {
                account_id: Some("acc789".to_string()),
            },
            Route::NotFound("/nowhere".to_string()),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_account_id_is_percent_encoded_and_round_trips() {
        for id in ["a&b", "acc 123", "a+b", "50%", "x=y"] {
            let route = Route::MoveMoney {
                account_id: Some(id.to_string()),
            };
            assert!(!route.path().contains(' '));
            assert_eq!(Route::parse(&route.path()), route);
        }
        assert_eq!(
            Route::MoveMoney {
                account_id: Some("a&b".to_string())
            }
            .path(),
            "/move-money?accountId=a%26b"
        );
    }

    #[test]
    fn test_query_values_are_decoded() {
        assert_eq!(
            Route::parse("/move-money?accountId=acc%20123"),
            Route::MoveMoney {
                account_id: Some("acc 123".to_string())
            }
        );
        assert_eq!(
            Route::parse("/card-controls?accountId=acc+123"),
            Route::CardControls {
                account_id: Some("acc 123".to_string())
            }
        );
        assert_eq!(
            Route::parse("/card-controls?accountId=a%2Bb"),
            Route::CardControls {
                account_id: Some("a+b".to_string())
            }
        );
    }

    #[test]
    fn test_requires_session() {
        assert!(!Route::Login.requires_session());
        assert!(Route::AccountsDashboard.requires_session());
        assert!(!Route::NotFound("/x".to_string()).requires_session());
    }

    #[test]
    fn test_display_uses_path() {
        let route = Route::CardControls {
            account_id: Some("acc123".to_string()),
        };
        assert_eq!(route.to_string(), "/card-controls?accountId=acc123");
    }
}
