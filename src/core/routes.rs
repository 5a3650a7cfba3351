//! # Routes
//!
//! Static path → view table used by the application shell.
//!
//! | path                | name                | view            |
//! |---------------------|---------------------|-----------------|
//! | `/`                 | `operadoras`        | listing         |
//! | `/operadora/:cnpj`  | `operadora-details` | detail (`cnpj`) |

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    OperadorasList,
    OperadoraDetails,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub name: &'static str,
    pub pattern: &'static str,
    pub view: View,
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        name: "operadoras",
        pattern: "/",
        view: View::OperadorasList,
    },
    RouteDef {
        name: "operadora-details",
        pattern: "/operadora/:cnpj",
        view: View::OperadoraDetails,
    },
];

/// A resolved route with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    OperadorasList,
    OperadoraDetails { cnpj: String },
}

impl Route {
    /// Matches `path` against the table. Query strings, fragments and a
    /// trailing slash are ignored.
    pub fn resolve(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        ROUTES.iter().find_map(|def| {
            let params = match_pattern(def.pattern, &segments)?;
            match def.view {
                View::OperadorasList => Some(Route::OperadorasList),
                View::OperadoraDetails => {
                    let cnpj = params.into_iter().find(|(k, _)| *k == "cnpj")?.1;
                    if matches!(cnpj, "." | "..") {
                        return None;
                    }
                    Some(Route::OperadoraDetails {
                        cnpj: cnpj.to_string(),
                    })
                }
            }
        })
    }

    pub fn view(&self) -> View {
        match self {
            Route::OperadorasList => View::OperadorasList,
            Route::OperadoraDetails { .. } => View::OperadoraDetails,
        }
    }

    pub fn name(&self) -> &'static str {
        ROUTES
            .iter()
            .find(|def| def.view == self.view())
            .map(|def| def.name)
            .unwrap_or_default()
    }

    /// The path that resolves back to this route.
    pub fn path(&self) -> String {
        match self {
            Route::OperadorasList => "/".to_string(),
            Route::OperadoraDetails { cnpj } => format!("/operadora/{cnpj}"),
        }
    }
}

/// Matches path segments against a `/a/:param` pattern, returning the
/// captured parameters.
fn match_pattern<'p, 's>(pattern: &'p str, segments: &[&'s str]) -> Option<Vec<(&'p str, &'s str)>> {
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if parts.len() != segments.len() {
        return None;
    }
    let mut params = Vec::new();
    for (&part, &segment) in parts.iter().zip(segments) {
        match part.strip_prefix(':') {
            Some(name) => params.push((name, segment)),
            None if part == segment => {}
            None => return None,
        }
    }
    Some(params)
}
